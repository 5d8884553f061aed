//! Configuration loading and types.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, InferenceConfig, ServerConfig, API_KEY_ENV_VAR};
