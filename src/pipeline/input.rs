//! Resolving the effective input text from an upload and the text area.

use thiserror::Error;

/// An uploaded file that is not UTF-8 text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Uploaded file is not valid UTF-8 text (invalid data at byte {valid_up_to})")]
pub struct DecodeError {
    /// Length of the valid UTF-8 prefix.
    pub valid_up_to: usize,
}

/// Pick the text to summarize.
///
/// Uploaded content overrides typed text. Typed text is used verbatim; no
/// trimming is applied on either path.
pub fn resolve_input(uploaded: Option<&[u8]>, typed: &str) -> Result<String, DecodeError> {
    match uploaded {
        Some(bytes) => std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|e| DecodeError {
                valid_up_to: e.valid_up_to(),
            }),
        None => Ok(typed.to_string()),
    }
}
