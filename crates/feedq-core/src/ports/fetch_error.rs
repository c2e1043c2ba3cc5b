//! Error types for item-source port operations.

use std::time::Duration;

use thiserror::Error;

/// Errors from fetching a batch of items.
///
/// Adapters map their own errors onto these. The manager never branches on
/// the variant; it records the message as the last error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The provider could not be reached.
    #[error("Network error: {message}")]
    Transport { message: String },

    /// The fetch did not resolve within the configured timeout.
    #[error("Fetch timed out after {after:?}")]
    Timeout { after: Duration },

    /// The provider answered with a non-success status.
    #[error("Provider request failed with status {status}: {url}")]
    Protocol { status: u16, url: String },

    /// The response did not match the expected schema.
    #[error("Invalid provider response: {message}")]
    Shape { message: String },

    /// The client is misconfigured (for example an unparsable base URL).
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Coarse failure class, for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Transport,
    Protocol,
    Shape,
    Configuration,
}

impl FetchError {
    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a shape error.
    pub fn shape(message: impl Into<String>) -> Self {
        Self::Shape {
            message: message.into(),
        }
    }

    /// Classify this error. Timeouts count as transport failures.
    pub const fn kind(&self) -> FetchErrorKind {
        match self {
            Self::Transport { .. } | Self::Timeout { .. } => FetchErrorKind::Transport,
            Self::Protocol { .. } => FetchErrorKind::Protocol,
            Self::Shape { .. } => FetchErrorKind::Shape,
            Self::Configuration { .. } => FetchErrorKind::Configuration,
        }
    }
}

/// Result type alias for item-source port operations.
pub type FetchResult<T> = Result<T, FetchError>;
