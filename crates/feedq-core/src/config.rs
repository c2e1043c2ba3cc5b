//! Prefetch queue configuration and validation.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of items requested per fetch.
pub const DEFAULT_BATCH_SIZE: u32 = 10;

/// Default queue length below which an automatic refill fires.
pub const DEFAULT_REFILL_THRESHOLD: u32 = 3;

/// Default namespaced key for the persisted queue snapshot.
pub const DEFAULT_STORAGE_KEY: &str = "feedq:queue";

/// Largest batch a single fetch may request.
pub const MAX_BATCH_SIZE: u32 = 100;

/// Configuration for a prefetch queue manager.
///
/// Use the builder methods to customise; call [`PrefetchConfig::validate`]
/// (the manager does this on construction) before use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefetchConfig {
    /// Number of items requested per fetch.
    pub batch_size: u32,
    /// Queue length below which an automatic refill fires.
    pub refill_threshold: u32,
    /// Whether the queue is persisted across restarts.
    pub persist: bool,
    /// Storage key holding the persisted snapshot.
    pub storage_key: String,
    /// Upper bound on a single fetch attempt, retries included.
    #[serde(with = "duration_secs")]
    pub fetch_timeout: Duration,
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            refill_threshold: DEFAULT_REFILL_THRESHOLD,
            persist: true,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            fetch_timeout: Duration::from_secs(30),
        }
    }
}

impl PrefetchConfig {
    /// Create a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of items requested per fetch.
    #[must_use]
    pub const fn with_batch_size(mut self, batch_size: u32) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the low-water mark.
    #[must_use]
    pub const fn with_refill_threshold(mut self, threshold: u32) -> Self {
        self.refill_threshold = threshold;
        self
    }

    /// Enable or disable persistence.
    #[must_use]
    pub const fn with_persist(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }

    /// Set the storage key for the persisted snapshot.
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the fetch timeout.
    #[must_use]
    pub const fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Check that the configuration is internally consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_BATCH_SIZE).contains(&self.batch_size) {
            return Err(ConfigError::InvalidBatchSize(self.batch_size));
        }

        if self.refill_threshold == 0 || self.refill_threshold > self.batch_size {
            return Err(ConfigError::InvalidRefillThreshold {
                threshold: self.refill_threshold,
                batch_size: self.batch_size,
            });
        }

        if self.fetch_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }

        if self.persist && self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }

        Ok(())
    }
}

/// Errors from configuration validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Batch size must be between 1 and 100, got {0}")]
    InvalidBatchSize(u32),

    #[error("Refill threshold must be between 1 and the batch size ({batch_size}), got {threshold}")]
    InvalidRefillThreshold { threshold: u32, batch_size: u32 },

    #[error("Fetch timeout must be greater than zero")]
    ZeroTimeout,

    #[error("Storage key cannot be empty when persistence is enabled")]
    EmptyStorageKey,
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
