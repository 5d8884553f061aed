//! Model selection: the catalog, the capability seam, and the handle cache.
//!
//! ```text
//! label ──→ catalog ──→ identifier ──→ ModelCache ──→ LoadedModel
//!                                          │
//!                                   ModelLoader (once per identifier)
//! ```

mod cache;
mod capability;
mod catalog;
mod error;
mod http;

pub use cache::ModelCache;
pub use capability::{LoadedModel, ModelLoader, SummarizationCapability, SummaryOptions};
pub use catalog::{default_model, lookup_identifier, lookup_label, model_options, ModelOption};
pub use error::{ModelLoadError, SummarizeError};
pub use http::{HttpModelLoader, HttpSummarizer};
