//! Summarization form feature module.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - Form state and stage
//! - `intent.rs` - User/pipeline events
//! - `reducer.rs` - State transitions
//!
//! Stages: `Idle` (no text) → `Ready` (text, no summary) → `Summarizing`
//! (trigger accepted) → `Summarized`. Changing the text or model while
//! summarized goes back to `Ready`.

mod intent;
mod reducer;
mod state;

pub use intent::FormIntent;
pub use reducer::FormReducer;
pub use state::{FormState, Notice, Stage};
