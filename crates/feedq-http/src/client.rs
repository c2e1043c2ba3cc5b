//! Feed client for fetching item batches.

use feedq_core::{FetchError, Item, ItemId};

use crate::config::FeedClientConfig;
use crate::error::FeedHttpResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::models::FeedConfig;
use crate::parsing::parse_batch_response;
use crate::url::build_batch_url;

// ============================================================================
// Type Aliases
// ============================================================================

/// Default feed client using the reqwest HTTP backend.
pub type DefaultFeedClient = FeedClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the batch endpoint.
///
/// Generic over an HTTP backend so tests can inject a fake. Production code
/// uses `DefaultFeedClient::new()` and talks to it through `ItemSourcePort`.
pub struct FeedClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) config: FeedConfig,
}

impl DefaultFeedClient {
    /// Create a new client with the given configuration.
    ///
    /// Fails with `FetchError::Configuration` if the endpoint URL does not
    /// parse or the HTTP client cannot be built.
    pub fn new(config: &FeedClientConfig) -> Result<Self, FetchError> {
        let config = FeedConfig::resolve(config).map_err(|e| FetchError::Configuration {
            message: e.to_string(),
        })?;
        let backend = ReqwestBackend::new(&config).map_err(|e| FetchError::Configuration {
            message: e.to_string(),
        })?;
        Ok(Self { backend, config })
    }
}

impl<B: HttpBackend> FeedClient<B> {
    /// Create a new client with a custom backend.
    #[cfg(test)]
    pub(crate) const fn with_backend(config: FeedConfig, backend: B) -> Self {
        Self { backend, config }
    }

    /// Request up to `count` items the caller does not already hold.
    pub(crate) async fn fetch_items(
        &self,
        count: u32,
        exclude: &[ItemId],
    ) -> FeedHttpResult<Vec<Item>> {
        let url = build_batch_url(&self.config, count, exclude);
        tracing::debug!(target: "feedq.http", %url, count, excluded = exclude.len(), "Requesting batch");

        let body: serde_json::Value = self.backend.get_json(&url).await?;
        let items = parse_batch_response(&body)?;

        tracing::debug!(target: "feedq.http", received = items.len(), "Batch received");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::{Canned, FakeBackend};
    use crate::url::excluded_ids;
    use serde_json::json;

    #[test]
    fn test_default_client_creation() {
        let config = FeedClientConfig::new("https://feed.example/api/items");
        assert!(DefaultFeedClient::new(&config).is_ok());
    }

    #[test]
    fn test_bad_url_is_configuration_error() {
        let result = DefaultFeedClient::new(&FeedClientConfig::new("::nope"));
        assert!(matches!(result, Err(FetchError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_fetch_items_sends_count_and_exclude() {
        let backend = FakeBackend::new().with_response(Canned::Json(json!({
            "success": true,
            "data": {"items": [{"id": "5", "resource_url": "https://cdn/5.jpg"}]}
        })));
        let client = FeedClient::with_backend(FeedConfig::for_tests(), backend.clone());

        let items = client
            .fetch_items(10, &[ItemId::new("3"), ItemId::new("4")])
            .await
            .unwrap();
        assert_eq!(items.len(), 1);

        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].query().unwrap().contains("count=10"));
        assert_eq!(excluded_ids(&requests[0]), vec!["3", "4"]);
    }
}
