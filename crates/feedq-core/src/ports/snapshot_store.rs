//! Snapshot storage port definition.
//!
//! A durable key-value slot for the serialized queue. Implementations live
//! in `feedq-store`.
//!
//! # Design
//!
//! - Values are opaque strings; serialization is the caller's concern
//! - A missing key is `Ok(None)`, not an error
//! - Removing a missing key succeeds

use async_trait::async_trait;
use thiserror::Error;

/// Errors from snapshot storage operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("Storage I/O failed for key '{key}': {message}")]
    Io { key: String, message: String },

    /// The storage backend cannot be used at all.
    #[error("Storage unavailable: {message}")]
    Unavailable { message: String },
}

impl StorageError {
    /// Create an I/O error for a key.
    pub fn io(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Io {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Port for a durable key-value slot.
///
/// # Usage
///
/// ```ignore
/// let store: Arc<dyn SnapshotStorePort> = /* ... */;
/// store.write("feedq:queue", &json).await?;
/// let restored = store.read("feedq:queue").await?;
/// ```
#[async_trait]
pub trait SnapshotStorePort: Send + Sync {
    /// Read the value stored under `key`.
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key` entirely.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
