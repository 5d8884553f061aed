//! Per-session form state.

use crate::models::{default_model, ModelOption};
use crate::pipeline::LengthBounds;
use crate::ui::mvi::UiState;

/// Where the form is in the summarize cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Stage {
    /// No input text.
    #[default]
    Idle,

    /// Input present, no current summary.
    Ready,

    /// Trigger accepted; the model call is in flight.
    Summarizing {
        /// Trigger this call belongs to. Outcomes carrying another value
        /// are stale.
        generation: u64,
    },

    /// A summary for the current input and model is displayed.
    Summarized {
        /// The generated summary, served verbatim by the download.
        summary: String,
    },
}

/// Message shown above the results area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A user prompt (e.g., no text entered). Not a failure.
    Prompt(String),

    /// A failure from decoding, loading, or summarizing.
    Error {
        /// Error category (`decode_error`, `model_load_error`, ...).
        kind: &'static str,
        message: String,
    },
}

/// Everything needed to render the form for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub model: &'static ModelOption,
    pub bounds: LengthBounds,
    /// The resolved input text.
    pub input: String,
    /// Whether `input` came from an uploaded file.
    pub input_from_upload: bool,
    pub dark_mode: bool,
    pub stage: Stage,
    pub notice: Option<Notice>,
    /// Number of accepted triggers in this session.
    pub generation: u64,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            model: default_model(),
            bounds: LengthBounds::default(),
            input: String::new(),
            input_from_upload: false,
            dark_mode: false,
            stage: Stage::Idle,
            notice: None,
            generation: 0,
        }
    }
}

impl UiState for FormState {}

impl FormState {
    /// The displayed summary, if any.
    pub fn summary(&self) -> Option<&str> {
        match &self.stage {
            Stage::Summarized { summary } => Some(summary),
            _ => None,
        }
    }

    /// Generation of the trigger whose model call is in flight, if any.
    pub fn pending_generation(&self) -> Option<u64> {
        match self.stage {
            Stage::Summarizing { generation } => Some(generation),
            _ => None,
        }
    }
}
