//! Intents for the summarization form.

use crate::models::ModelOption;
use crate::pipeline::LengthBounds;
use crate::ui::mvi::Intent;

/// Events that drive the form state machine.
#[derive(Debug, Clone)]
pub enum FormIntent {
    /// The resolved input text changed.
    InputChanged {
        text: String,
        /// The text came from an uploaded file.
        from_upload: bool,
    },

    /// An uploaded file could not be decoded. Input is left unchanged.
    UploadRejected { message: String },

    /// Another model was selected.
    ModelChanged { model: &'static ModelOption },

    /// Length sliders moved.
    BoundsChanged { bounds: LengthBounds },

    /// Dark mode toggled.
    ThemeToggled,

    /// User pressed Summarize.
    TriggerPressed,

    /// The model returned a summary for trigger `generation`.
    SummaryCompleted { generation: u64, summary: String },

    /// The model call for trigger `generation` failed.
    SummaryFailed {
        generation: u64,
        kind: &'static str,
        message: String,
    },
}

impl Intent for FormIntent {}
