//! Resolve -> validate -> summarize.
//!
//! - `input.rs` - upload vs. typed text
//! - `request.rs` - length bounds and validated requests
//! - `invoker.rs` - calling the model
//! - `words.rs` - word counting for display

mod input;
mod invoker;
mod request;
mod words;

use thiserror::Error;

use crate::models::{ModelLoadError, SummarizeError};

pub use input::{resolve_input, DecodeError};
pub use invoker::Summarizer;
pub use request::{
    LengthBounds, SummaryRequest, SummaryResult, DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH,
    MAX_LENGTH_RANGE, MIN_LENGTH_RANGE,
};
pub use words::{format_word_count, word_count};

/// Prompt shown when the trigger is pressed without any text.
pub const EMPTY_INPUT_PROMPT: &str = "Please enter some text to summarize.";

/// Prompt shown when an uploaded file resolved to no text.
pub const EMPTY_UPLOAD_PROMPT: &str = "Please enter some text or upload a file to summarize.";

/// Everything that can stop a trigger from producing a summary.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// No text to summarize. Expected, not a fault.
    #[error("{}", empty_prompt(.upload_attempted))]
    EmptyInput { upload_attempted: bool },

    /// Uploaded file is not UTF-8.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Model load or generation failed.
    #[error(transparent)]
    Summarize(#[from] SummarizeError),
}

impl From<ModelLoadError> for PipelineError {
    fn from(err: ModelLoadError) -> Self {
        PipelineError::Summarize(SummarizeError::ModelLoad(err))
    }
}

impl PipelineError {
    /// Short category used in logs and as the error banner title.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::EmptyInput { .. } => "empty_input",
            PipelineError::Decode(_) => "decode_error",
            PipelineError::Summarize(SummarizeError::ModelLoad(_)) => "model_load_error",
            PipelineError::Summarize(_) => "summarization_error",
        }
    }
}

fn empty_prompt(upload_attempted: &bool) -> &'static str {
    if *upload_attempted {
        EMPTY_UPLOAD_PROMPT
    } else {
        EMPTY_INPUT_PROMPT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_messages() {
        let typed = PipelineError::EmptyInput {
            upload_attempted: false,
        };
        let uploaded = PipelineError::EmptyInput {
            upload_attempted: true,
        };
        assert_eq!(typed.to_string(), "Please enter some text to summarize.");
        assert_eq!(
            uploaded.to_string(),
            "Please enter some text or upload a file to summarize."
        );
        assert_eq!(typed.kind(), "empty_input");
    }

    #[test]
    fn kinds_distinguish_decode_from_empty() {
        let decode = PipelineError::from(DecodeError { valid_up_to: 0 });
        assert_eq!(decode.kind(), "decode_error");

        let load = PipelineError::from(ModelLoadError::UnknownModel {
            identifier: "x".into(),
        });
        assert_eq!(load.kind(), "model_load_error");
    }
}
