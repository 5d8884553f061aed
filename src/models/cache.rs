//! Process-wide get-or-create cache of loaded model handles.
//!
//! Each catalog identifier owns one slot. The first request for an
//! identifier runs the loader; concurrent requests for the same identifier
//! wait on that single load. Handles are never evicted.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use tokio::sync::OnceCell;

use super::capability::{LoadedModel, ModelLoader};
use super::catalog::lookup_identifier;
use super::error::ModelLoadError;

type Slot = Arc<OnceCell<LoadedModel>>;

/// Cache of loaded models keyed by identifier.
///
/// Cheap to clone; clones share the same slots.
#[derive(Clone)]
pub struct ModelCache {
    loader: Arc<dyn ModelLoader>,
    slots: Arc<Mutex<HashMap<&'static str, Slot>>>,
}

impl ModelCache {
    /// Create an empty cache backed by `loader`.
    pub fn new(loader: Arc<dyn ModelLoader>) -> Self {
        Self {
            loader,
            slots: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Return the handle for `identifier`, loading it on first use.
    ///
    /// # Errors
    /// Returns [`ModelLoadError::UnknownModel`] for identifiers outside the
    /// catalog, or the loader's error. A failed load leaves the slot empty.
    pub async fn get_model(&self, identifier: &str) -> Result<LoadedModel, ModelLoadError> {
        let option = lookup_identifier(identifier).ok_or_else(|| ModelLoadError::UnknownModel {
            identifier: identifier.to_string(),
        })?;

        let slot = {
            let mut slots = self.slots.lock();
            slots.entry(option.identifier).or_default().clone()
        };

        let model = slot
            .get_or_try_init(|| async {
                tracing::info!(model = %option.identifier, "Loading summarization model");
                let start = Instant::now();
                let loaded = self.loader.load(option).await;
                match &loaded {
                    Ok(_) => tracing::info!(
                        model = %option.identifier,
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "Model loaded"
                    ),
                    Err(e) => tracing::warn!(
                        model = %option.identifier,
                        error = %e,
                        "Model load failed"
                    ),
                }
                loaded
            })
            .await?;

        Ok(model.clone())
    }

    /// Whether a handle for `identifier` is already cached.
    pub fn is_loaded(&self, identifier: &str) -> bool {
        self.slots
            .lock()
            .get(identifier)
            .is_some_and(|slot| slot.initialized())
    }

    /// Number of cached handles.
    pub fn loaded_count(&self) -> usize {
        self.slots
            .lock()
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }
}
