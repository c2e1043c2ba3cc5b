//! Public configuration for the feed HTTP client.

use std::time::Duration;

/// How often and how patiently a failed batch request is retried.
///
/// Only transport failures and 5xx answers are retried. The delay before
/// retry `n` (1-based) is `base_delay * 2^(n-1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub retries: u8,
    /// Delay before the first retry.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// A single attempt, never retried.
    pub const NONE: Self = Self {
        retries: 0,
        base_delay: Duration::ZERO,
    };

    /// Delay before the given retry. `retry` starts at 1.
    pub fn delay_before(&self, retry: u8) -> Duration {
        let factor = 1u32
            .checked_shl(u32::from(retry.saturating_sub(1)))
            .unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 2,
            base_delay: Duration::from_millis(250),
        }
    }
}

/// Settings for talking to the batch endpoint.
///
/// ```
/// use feedq_http::{FeedClientConfig, RetryPolicy};
/// use std::time::Duration;
///
/// let config = FeedClientConfig::new("https://feed.example/api/items")
///     .with_request_timeout(Duration::from_secs(10))
///     .with_retry(RetryPolicy::NONE);
/// ```
#[derive(Debug, Clone)]
pub struct FeedClientConfig {
    pub(crate) endpoint: String,
    pub(crate) user_agent: String,
    pub(crate) request_timeout: Duration,
    pub(crate) bearer_token: Option<String>,
    pub(crate) retry: RetryPolicy,
}

impl FeedClientConfig {
    /// Settings for `endpoint` with a 15s request timeout and the default
    /// retry policy.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            user_agent: concat!("feedq/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout: Duration::from_secs(15),
            bearer_token: None,
            retry: RetryPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Timeout for one HTTP attempt. The manager applies its own overall
    /// deadline on top.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Send `Authorization: Bearer <token>` when a token is given.
    #[must_use]
    pub fn with_optional_token(mut self, token: Option<String>) -> Self {
        self.bearer_token = token.filter(|t| !t.is_empty());
        self
    }

    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}
