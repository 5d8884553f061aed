//! Seams between the form and whatever actually runs the models.

use std::sync::Arc;

use async_trait::async_trait;

use super::catalog::ModelOption;
use super::error::{ModelLoadError, SummarizeError};

/// Generation parameters forwarded to the capability untouched.
///
/// The bounds are advisory: their exact meaning (tokens or words) belongs to
/// the underlying model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryOptions {
    pub max_length: u32,
    pub min_length: u32,
    /// Sampling flag. The form always sends `false` (greedy decoding).
    pub do_sample: bool,
}

/// A loaded summarization model.
#[async_trait]
pub trait SummarizationCapability: Send + Sync {
    /// Identifier of the model behind this handle.
    fn identifier(&self) -> &str;

    /// Summarize `text`, returning candidates best-first.
    async fn summarize(
        &self,
        text: &str,
        options: &SummaryOptions,
    ) -> Result<Vec<String>, SummarizeError>;
}

/// Shared handle to a loaded model.
pub type LoadedModel = Arc<dyn SummarizationCapability>;

/// Performs the (expensive) load of a model.
///
/// Called at most once per identifier by [`ModelCache`](super::ModelCache)
/// unless a previous load failed.
#[async_trait]
pub trait ModelLoader: Send + Sync {
    async fn load(&self, option: &ModelOption) -> Result<LoadedModel, ModelLoadError>;
}
