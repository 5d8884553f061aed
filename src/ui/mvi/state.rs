//! Base trait for view state.

/// Marker trait for state objects.
///
/// States are cloned per transition, compared to detect changes, and start
/// from `Default` for a fresh session.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
