//! Base trait for form events.

/// Marker trait for intent objects.
///
/// Intents are either user actions on the form (new text, another model,
/// pressing Summarize) or pipeline outcomes (summary ready, failure).
pub trait Intent: Send + 'static {}
