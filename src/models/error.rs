//! Error types for model loading and summarization.

use thiserror::Error;

/// Errors raised while obtaining a model handle.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    /// The identifier is not part of the model catalog.
    #[error("Unknown model '{identifier}'")]
    UnknownModel { identifier: String },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client for '{identifier}': {source}")]
    Client {
        identifier: String,
        #[source]
        source: reqwest::Error,
    },

    /// The inference endpoint could not be reached.
    #[error("Failed to reach model '{identifier}': {source}")]
    Connection {
        identifier: String,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered, but the model cannot be served.
    #[error("Model '{identifier}' is unavailable ({status}): {message}")]
    Unavailable {
        identifier: String,
        status: u16,
        message: String,
    },
}

impl ModelLoadError {
    /// Identifier of the model that failed to load.
    pub fn identifier(&self) -> &str {
        match self {
            ModelLoadError::UnknownModel { identifier }
            | ModelLoadError::Client { identifier, .. }
            | ModelLoadError::Connection { identifier, .. }
            | ModelLoadError::Unavailable { identifier, .. } => identifier,
        }
    }
}

/// Errors raised while generating a summary.
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// The selected model could not be loaded.
    #[error(transparent)]
    ModelLoad(#[from] ModelLoadError),

    /// Length bounds are out of range or contradictory.
    #[error("Invalid length bounds: {0}")]
    InvalidBounds(String),

    /// Transport-level failure talking to the inference API.
    #[error("Summarization request to '{identifier}' failed: {source}")]
    Connection {
        identifier: String,
        #[source]
        source: reqwest::Error,
    },

    /// The inference API returned a non-success status.
    #[error("Inference API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("Failed to parse inference response: {0}")]
    ParseError(String),

    /// The capability reported no summary.
    #[error("Model returned no summary")]
    EmptyResponse,
}
