use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub inference: InferenceConfig,
}

/// HTTP server settings for the summarization form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the form server (host:port).
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Largest accepted request body in bytes (typed text plus upload).
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// Form sessions unused for this many seconds are dropped (default: 3600).
    #[serde(default = "default_session_idle_seconds")]
    pub session_idle_seconds: u64,
    /// Most form sessions kept at once; the least recently used is evicted
    /// beyond this (default: 10000).
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

/// Settings for the remote summarization capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Base URL of the inference API (e.g., "https://api-inference.huggingface.co").
    #[serde(default = "default_inference_base_url")]
    pub base_url: String,
    /// Bearer token. Falls back to the `HF_TOKEN` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in seconds (default: 120).
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Probe the model endpoint when a model is first loaded (default: true).
    #[serde(default = "default_verify_on_load")]
    pub verify_on_load: bool,
}

/// Environment variable consulted when `inference.api_key` is unset.
pub const API_KEY_ENV_VAR: &str = "HF_TOKEN";

impl InferenceConfig {
    /// The configured API key, or the `HF_TOKEN` environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| std::env::var(API_KEY_ENV_VAR).ok().filter(|key| !key.is_empty()))
    }
}

fn default_bind_addr() -> String {
    "127.0.0.1:8501".to_string()
}

fn default_max_body_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_session_idle_seconds() -> u64 {
    60 * 60
}

fn default_max_sessions() -> usize {
    10_000
}

fn default_inference_base_url() -> String {
    "https://api-inference.huggingface.co".to_string()
}

fn default_timeout_seconds() -> u64 {
    120
}

fn default_verify_on_load() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            max_body_bytes: default_max_body_bytes(),
            session_idle_seconds: default_session_idle_seconds(),
            max_sessions: default_max_sessions(),
        }
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: default_inference_base_url(),
            api_key: None,
            timeout_seconds: default_timeout_seconds(),
            verify_on_load: default_verify_on_load(),
        }
    }
}
