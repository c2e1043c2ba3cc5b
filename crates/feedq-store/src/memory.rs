//! In-memory snapshot store for tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use feedq_core::{SnapshotStorePort, StorageError};
use tokio::sync::Mutex;

/// Snapshot store backed by a shared map.
///
/// Clones share the same map, so a test can keep one handle for assertions
/// while the manager owns another.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySnapshotStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self {
            entries: Arc::new(Mutex::new(entries)),
        }
    }

    /// Current value for `key`, bypassing the port.
    pub async fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().await.get(key).cloned()
    }

    /// Whether `key` is present.
    pub async fn contains(&self, key: &str) -> bool {
        self.entries.lock().await.contains_key(key)
    }
}

#[async_trait]
impl SnapshotStorePort for MemorySnapshotStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get(key).await)
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        tokio_test::block_on(async {
            let store = MemorySnapshotStore::new();
            assert!(!store.contains("k").await);

            store.write("k", "v").await.unwrap();
            assert_eq!(store.read("k").await.unwrap().as_deref(), Some("v"));

            store.remove("k").await.unwrap();
            assert!(!store.contains("k").await);
        });
    }

    #[test]
    fn test_clones_share_state() {
        tokio_test::block_on(async {
            let store = MemorySnapshotStore::with_entry("k", "v");
            let handle = store.clone();

            store.write("k", "w").await.unwrap();
            assert_eq!(handle.get("k").await.as_deref(), Some("w"));
        });
    }
}
