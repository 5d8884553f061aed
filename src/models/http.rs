//! Summarization capability backed by a remote inference API.
//!
//! Speaks the Hugging Face Inference API request shape:
//!
//! ```text
//! POST {base_url}/models/{identifier}
//! {"inputs": "...", "parameters": {"max_length": 350, "min_length": 130, "do_sample": false}}
//!
//! -> [{"summary_text": "..."}]
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use crate::config::InferenceConfig;

use super::capability::{LoadedModel, ModelLoader, SummarizationCapability, SummaryOptions};
use super::catalog::ModelOption;
use super::error::{ModelLoadError, SummarizeError};

/// Loader that binds an HTTP client to a model identifier.
pub struct HttpModelLoader {
    config: InferenceConfig,
}

impl HttpModelLoader {
    pub fn new(config: InferenceConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ModelLoader for HttpModelLoader {
    async fn load(&self, option: &ModelOption) -> Result<LoadedModel, ModelLoadError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .build()
            .map_err(|source| ModelLoadError::Client {
                identifier: option.identifier.to_string(),
                source,
            })?;

        let summarizer = HttpSummarizer {
            client,
            identifier: option.identifier.to_string(),
            base_url: self.config.base_url.trim_end_matches('/').to_string(),
            api_key: self.config.resolve_api_key(),
        };

        if self.config.verify_on_load {
            summarizer.probe().await?;
        }

        Ok(Arc::new(summarizer))
    }
}

/// HTTP client for one model.
pub struct HttpSummarizer {
    client: Client,
    identifier: String,
    base_url: String,
    api_key: Option<String>,
}

impl HttpSummarizer {
    fn model_url(&self) -> String {
        format!("{}/models/{}", self.base_url, self.identifier)
    }

    fn status_url(&self) -> String {
        format!("{}/status/{}", self.base_url, self.identifier)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => builder.header("Authorization", format!("Bearer {}", key)),
            None => builder,
        }
    }

    /// Ask the API whether the model can be served.
    async fn probe(&self) -> Result<(), ModelLoadError> {
        let url = self.status_url();
        tracing::debug!(url = %url, "Probing model availability");

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|source| ModelLoadError::Connection {
                identifier: self.identifier.clone(),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error body".to_string());

        Err(ModelLoadError::Unavailable {
            identifier: self.identifier.clone(),
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}

#[async_trait]
impl SummarizationCapability for HttpSummarizer {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    async fn summarize(
        &self,
        text: &str,
        options: &SummaryOptions,
    ) -> Result<Vec<String>, SummarizeError> {
        let url = self.model_url();
        let request_body = build_request(text, options);

        tracing::debug!(
            url = %url,
            input_len = text.len(),
            max_length = options.max_length,
            min_length = options.min_length,
            "Sending summarization request"
        );

        let start = Instant::now();
        let response = self
            .authorize(self.client.post(&url))
            .json(&request_body)
            .send()
            .await
            .map_err(|source| SummarizeError::Connection {
                identifier: self.identifier.clone(),
                source,
            })?;

        let latency_ms = start.elapsed().as_millis() as u64;
        let status = response.status();

        let response_text = response
            .text()
            .await
            .map_err(|source| SummarizeError::Connection {
                identifier: self.identifier.clone(),
                source,
            })?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                latency_ms,
                error = %response_text,
                "Inference API error"
            );
            return Err(SummarizeError::ApiError {
                status: status.as_u16(),
                message: error_message(&response_text),
            });
        }

        tracing::debug!(status = %status, latency_ms, "Summarization response received");
        parse_response(&response_text)
    }
}

/// Inference API request body.
#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    inputs: &'a str,
    parameters: Parameters,
}

#[derive(Debug, Serialize)]
struct Parameters {
    max_length: u32,
    min_length: u32,
    do_sample: bool,
}

/// One element of the inference API response array.
#[derive(Debug, Deserialize)]
struct ApiSummary {
    summary_text: String,
}

fn build_request<'a>(text: &'a str, options: &SummaryOptions) -> ApiRequest<'a> {
    ApiRequest {
        inputs: text,
        parameters: Parameters {
            max_length: options.max_length,
            min_length: options.min_length,
            do_sample: options.do_sample,
        },
    }
}

fn parse_response(body: &str) -> Result<Vec<String>, SummarizeError> {
    let summaries: Vec<ApiSummary> = serde_json::from_str(body).map_err(|e| {
        SummarizeError::ParseError(format!("Failed to parse response JSON: {}", e))
    })?;
    Ok(summaries.into_iter().map(|s| s.summary_text).collect())
}

/// Pull the `error` field out of a JSON error body, else return it as-is.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or_else(|| body.to_string())
}
