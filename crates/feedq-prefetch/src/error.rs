//! Error types for the prefetch crate.
//!
//! Only construction can fail outward. Everything at runtime is either
//! surfaced through `last_error` (fetch failures) or absorbed (storage and
//! snapshot problems).

use feedq_core::ConfigError;
use thiserror::Error;

/// Errors from building a prefetch manager.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrefetchError {
    #[error("Invalid prefetch configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Reasons a persisted snapshot is rejected.
///
/// Never surfaced to the consumer; logged and treated as "no snapshot".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CorruptSnapshot {
    #[error("snapshot is not valid JSON: {0}")]
    Json(String),

    #[error("snapshot is not an array")]
    NotAnArray,

    #[error("snapshot entry {index} lacks a non-empty id or resource locator")]
    InvalidEntry { index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts() {
        let err: PrefetchError = ConfigError::ZeroTimeout.into();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn test_corrupt_snapshot_messages() {
        assert!(
            CorruptSnapshot::InvalidEntry { index: 3 }
                .to_string()
                .contains("entry 3")
        );
        assert_eq!(CorruptSnapshot::NotAnArray.to_string(), "snapshot is not an array");
    }
}
