//! Error types and response handling for the form server.
//!
//! Pipeline failures are rendered into the page; these are the failures
//! that prevent rendering a page at all.

use axum::body::Body;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors that can occur while handling a form request.
#[derive(Debug, Error)]
pub enum AppError {
    /// The multipart body could not be read
    #[error("Malformed form submission: {0}")]
    Multipart(#[from] MultipartError),

    /// A form field had an unusable value
    #[error("Invalid value for '{field}': {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },

    /// Download requested with no summary on display
    #[error("No summary available to download")]
    NoSummary,
}

impl AppError {
    /// Map error variant to appropriate HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Multipart(err) => err.status(),
            AppError::InvalidField { .. } => StatusCode::BAD_REQUEST,
            AppError::NoSummary => StatusCode::NOT_FOUND,
        }
    }

    /// Get error type string for JSON responses
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Multipart(_) => "malformed_form",
            AppError::InvalidField { .. } => "invalid_field",
            AppError::NoSummary => "no_summary",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::warn!(error_type = self.error_type(), error = %self, "Request rejected");

        let body = serde_json::json!({
            "error": {
                "type": self.error_type(),
                "message": self.to_string(),
            }
        });

        let mut response = Response::new(Body::from(body.to_string()));
        *response.status_mut() = self.status_code();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/json"),
        );
        response
    }
}
