//! Summary requests and their length bounds.

use std::ops::RangeInclusive;

use crate::models::SummarizeError;

use super::words::word_count;
use super::PipelineError;

/// Accepted range for the maximum summary length.
pub const MAX_LENGTH_RANGE: RangeInclusive<u32> = 50..=800;
/// Accepted range for the minimum summary length.
pub const MIN_LENGTH_RANGE: RangeInclusive<u32> = 20..=300;
/// Initial maximum length.
pub const DEFAULT_MAX_LENGTH: u32 = 350;
/// Initial minimum length.
pub const DEFAULT_MIN_LENGTH: u32 = 130;

/// Summary length bounds as chosen on the form.
///
/// Each bound is range-checked on construction. Their relative order is
/// only checked when a request is built, so the form can hold a
/// contradictory pair and report it when the user triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub max_length: u32,
    pub min_length: u32,
}

impl LengthBounds {
    pub fn new(max_length: u32, min_length: u32) -> Result<Self, SummarizeError> {
        if !MAX_LENGTH_RANGE.contains(&max_length) {
            return Err(SummarizeError::InvalidBounds(format!(
                "maximum length {} is outside {}..={}",
                max_length,
                MAX_LENGTH_RANGE.start(),
                MAX_LENGTH_RANGE.end()
            )));
        }
        if !MIN_LENGTH_RANGE.contains(&min_length) {
            return Err(SummarizeError::InvalidBounds(format!(
                "minimum length {} is outside {}..={}",
                min_length,
                MIN_LENGTH_RANGE.start(),
                MIN_LENGTH_RANGE.end()
            )));
        }
        Ok(Self {
            max_length,
            min_length,
        })
    }
}

impl Default for LengthBounds {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            min_length: DEFAULT_MIN_LENGTH,
        }
    }
}

/// A validated request: non-empty text and `min_length <= max_length`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    text: String,
    model_identifier: String,
    bounds: LengthBounds,
}

impl SummaryRequest {
    /// Build a request.
    ///
    /// # Errors
    /// - [`PipelineError::EmptyInput`] when `text` is empty
    /// - [`SummarizeError::InvalidBounds`] when `min_length > max_length`
    pub fn new(
        text: impl Into<String>,
        model_identifier: impl Into<String>,
        bounds: LengthBounds,
    ) -> Result<Self, PipelineError> {
        let text = text.into();
        if text.is_empty() {
            return Err(PipelineError::EmptyInput {
                upload_attempted: false,
            });
        }
        if bounds.min_length > bounds.max_length {
            return Err(SummarizeError::InvalidBounds(format!(
                "minimum length {} exceeds maximum length {}",
                bounds.min_length, bounds.max_length
            ))
            .into());
        }
        Ok(Self {
            text,
            model_identifier: model_identifier.into(),
            bounds,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn model_identifier(&self) -> &str {
        &self.model_identifier
    }

    pub fn bounds(&self) -> LengthBounds {
        self.bounds
    }
}

/// The generated summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryResult {
    pub summary_text: String,
}

impl SummaryResult {
    pub fn word_count(&self) -> usize {
        word_count(&self.summary_text)
    }
}
