//! Presentation: form state machine, colors, and HTML.

pub mod form;
pub mod mvi;
pub mod render;
pub mod theme;
