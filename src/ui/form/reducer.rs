//! Reducer for the summarization form.

use crate::pipeline::PipelineError;
use crate::ui::mvi::Reducer;

use super::intent::FormIntent;
use super::state::{FormState, Notice, Stage};

/// Reducer for form state transitions.
pub struct FormReducer;

impl Reducer for FormReducer {
    type State = FormState;
    type Intent = FormIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            FormIntent::InputChanged { text, from_upload } => {
                state.input_from_upload = from_upload;
                if text == state.input {
                    return state;
                }
                // A displayed summary belongs to the old text; drop it.
                state.stage = if text.is_empty() {
                    Stage::Idle
                } else {
                    Stage::Ready
                };
                state.input = text;
                state.notice = None;
                state
            }

            FormIntent::UploadRejected { message } => {
                state.notice = Some(Notice::Error {
                    kind: "decode_error",
                    message,
                });
                state
            }

            FormIntent::ModelChanged { model } => {
                if model == state.model {
                    return state;
                }
                state.model = model;
                // Summaries, shown or in flight, belong to the old model.
                if matches!(
                    state.stage,
                    Stage::Summarized { .. } | Stage::Summarizing { .. }
                ) {
                    state.stage = Stage::Ready;
                }
                state
            }

            FormIntent::BoundsChanged { bounds } => {
                state.bounds = bounds;
                state
            }

            FormIntent::ThemeToggled => {
                state.dark_mode = !state.dark_mode;
                state
            }

            FormIntent::TriggerPressed => {
                if state.input.is_empty() {
                    let prompt = PipelineError::EmptyInput {
                        upload_attempted: state.input_from_upload,
                    };
                    state.notice = Some(Notice::Prompt(prompt.to_string()));
                    return state;
                }
                state.generation = state.generation.wrapping_add(1);
                state.stage = Stage::Summarizing {
                    generation: state.generation,
                };
                state.notice = None;
                state
            }

            FormIntent::SummaryCompleted {
                generation,
                summary,
            } => {
                if state.pending_generation() == Some(generation) {
                    state.stage = Stage::Summarized { summary };
                }
                state
            }

            FormIntent::SummaryFailed {
                generation,
                kind,
                message,
            } => {
                if state.pending_generation() == Some(generation) {
                    state.stage = Stage::Ready;
                    state.notice = Some(Notice::Error { kind, message });
                }
                state
            }
        }
    }
}
