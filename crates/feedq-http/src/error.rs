//! Errors internal to the HTTP adapter, mapped to `FetchError` in `port.rs`.

use thiserror::Error;

pub type FeedHttpResult<T> = Result<T, FeedHttpError>;

#[derive(Debug, Error)]
pub enum FeedHttpError {
    /// Non-2xx answer.
    #[error("Provider request failed with status {status}: {url}")]
    Status { status: u16, url: String },

    /// Well-formed JSON in the wrong shape.
    #[error("Unexpected batch response: {0}")]
    Malformed(String),

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl FeedHttpError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }

    /// Whether another attempt could succeed.
    pub(crate) fn is_transient(&self) -> bool {
        match self {
            Self::Status { status, .. } => *status >= 500,
            Self::Transport(e) => !e.is_decode(),
            Self::Malformed(_) | Self::Url(_) | Self::Json(_) => false,
        }
    }
}
