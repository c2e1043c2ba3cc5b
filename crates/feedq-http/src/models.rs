//! Resolved client settings.

use std::time::Duration;

use url::Url;

use crate::config::{FeedClientConfig, RetryPolicy};
use crate::error::FeedHttpResult;

/// [`FeedClientConfig`] with the endpoint parsed.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub endpoint: Url,
    pub user_agent: String,
    pub request_timeout: Duration,
    pub bearer_token: Option<String>,
    pub retry: RetryPolicy,
}

impl FeedConfig {
    pub fn resolve(config: &FeedClientConfig) -> FeedHttpResult<Self> {
        Ok(Self {
            endpoint: Url::parse(&config.endpoint)?,
            user_agent: config.user_agent.clone(),
            request_timeout: config.request_timeout,
            bearer_token: config.bearer_token.clone(),
            retry: config.retry,
        })
    }

    /// Settings pointing at a fixed test endpoint.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            endpoint: Url::parse("https://feed.example/api/items").unwrap(),
            user_agent: "feedq-test".to_string(),
            request_timeout: Duration::from_secs(5),
            bearer_token: None,
            retry: RetryPolicy::NONE,
        }
    }
}
