//! Calls the selected model for a validated request.

use std::time::Instant;

use crate::models::{ModelCache, SummarizeError, SummaryOptions};

use super::request::{SummaryRequest, SummaryResult};

/// Runs summary requests against models obtained from a [`ModelCache`].
#[derive(Clone)]
pub struct Summarizer {
    models: ModelCache,
}

impl Summarizer {
    pub fn new(models: ModelCache) -> Self {
        Self { models }
    }

    /// The model cache this summarizer draws handles from.
    pub fn models(&self) -> &ModelCache {
        &self.models
    }

    /// Summarize with greedy decoding and the request's bounds.
    ///
    /// Returns the first (best) candidate reported by the model.
    pub async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResult, SummarizeError> {
        let model = self.models.get_model(request.model_identifier()).await?;

        let bounds = request.bounds();
        let options = SummaryOptions {
            max_length: bounds.max_length,
            min_length: bounds.min_length,
            do_sample: false,
        };

        let start = Instant::now();
        let candidates = model.summarize(request.text(), &options).await?;
        let summary_text = candidates
            .into_iter()
            .next()
            .ok_or(SummarizeError::EmptyResponse)?;
        let result = SummaryResult { summary_text };

        tracing::info!(
            model = %model.identifier(),
            input_words = super::word_count(request.text()),
            summary_words = result.word_count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Summary generated"
        );

        Ok(result)
    }
}
