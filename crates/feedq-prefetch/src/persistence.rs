//! Snapshot persistence for the queue.
//!
//! Wraps an optional `SnapshotStorePort` with the manager's policy: storage
//! failures never propagate, an empty queue erases its key, and an
//! unreadable snapshot is dropped so the next start is clean.

use std::sync::Arc;

use feedq_core::{Item, PrefetchConfig, SnapshotStorePort};
use serde_json::Value;
use tracing::{debug, warn};

/// Persistence policy around an optional store.
#[derive(Clone)]
pub struct SnapshotPersistence {
    store: Option<Arc<dyn SnapshotStorePort>>,
    key: String,
}

impl SnapshotPersistence {
    /// Build from config. Persistence is disabled when `config.persist` is
    /// false or no store was supplied.
    pub fn new(config: &PrefetchConfig, store: Option<Arc<dyn SnapshotStorePort>>) -> Self {
        Self {
            store: store.filter(|_| config.persist),
            key: config.storage_key.clone(),
        }
    }

    pub const fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    /// Read and parse the stored snapshot.
    ///
    /// Returns `None` when disabled, when nothing is stored, when the read
    /// fails, or when the value is not JSON (that value is also erased).
    pub async fn load(&self) -> Option<Value> {
        let store = self.store.as_ref()?;

        let raw = match store.read(&self.key).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(target: "feedq.store", key = %self.key, error = %e, "Failed to read queue snapshot");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(target: "feedq.store", key = %self.key, error = %e, "Discarding unparsable queue snapshot");
                self.erase().await;
                None
            }
        }
    }

    /// Persist the queue contents, or erase the key if `items` is empty.
    pub async fn save(&self, items: &[Item]) {
        let Some(store) = self.store.as_ref() else {
            return;
        };

        if items.is_empty() {
            self.erase().await;
            return;
        }

        let json = match serde_json::to_string(items) {
            Ok(json) => json,
            Err(e) => {
                warn!(target: "feedq.store", error = %e, "Failed to serialize queue snapshot");
                return;
            }
        };

        match store.write(&self.key, &json).await {
            Ok(()) => debug!(target: "feedq.store", key = %self.key, items = items.len(), "Saved queue snapshot"),
            Err(e) => warn!(target: "feedq.store", key = %self.key, error = %e, "Failed to write queue snapshot"),
        }
    }

    /// Remove the stored snapshot.
    pub async fn erase(&self) {
        let Some(store) = self.store.as_ref() else {
            return;
        };

        if let Err(e) = store.remove(&self.key).await {
            warn!(target: "feedq.store", key = %self.key, error = %e, "Failed to remove queue snapshot");
        }
    }
}
