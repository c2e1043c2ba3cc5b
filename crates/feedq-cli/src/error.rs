//! CLI-specific error types and exit codes.

use feedq_core::{FetchError, PathError};
use feedq_prefetch::PrefetchError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid options or environment.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The data directory could not be prepared.
    #[error("IO error: {0}")]
    Io(String),

    /// The provider could not be reached or answered badly.
    #[error("Fetch failed: {0}")]
    Fetch(String),
}

impl CliError {
    /// Map error to an exit code (sysexits.h where one fits).
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 78, // EX_CONFIG
            Self::Io(_) => 74,     // EX_IOERR
            Self::Fetch(_) => 69,  // EX_UNAVAILABLE
        }
    }
}

impl From<PrefetchError> for CliError {
    fn from(err: PrefetchError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<FetchError> for CliError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Configuration { message } => Self::Config(message),
            other => Self::Fetch(other.to_string()),
        }
    }
}
