//! Model-View-Intent (MVI) primitives for the form.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ HTML
//!    ↑                              │
//!    └──────── form submit ─────────┘
//! ```
//!
//! - **State**: everything needed to render the page for one session
//! - **Intent**: a discrete form event (input changed, trigger pressed, ...)
//! - **Reducer**: pure `(State, Intent) -> State`

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
