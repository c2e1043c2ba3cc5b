//! HTTP resource preloader.
//!
//! Primes an item's resource by downloading it once and discarding the
//! body, so caches between here and the origin are warm when the consumer
//! asks for it for real.

use std::sync::Arc;
use std::time::Duration;

use feedq_core::{FetchError, Item, ResourcePreloaderPort};
use tokio::sync::Semaphore;

/// Default cap on concurrent priming requests.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 4;

/// Preloader that issues a GET per resource on a background task.
///
/// Requires a tokio runtime; outside one, `preload` logs and returns.
#[derive(Clone)]
pub struct HttpPreloader {
    client: reqwest::Client,
    permits: Arc<Semaphore>,
}

impl HttpPreloader {
    /// Create a preloader with the given request timeout and concurrency cap.
    pub fn new(timeout: Duration, max_in_flight: usize) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Configuration {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            permits: Arc::new(Semaphore::new(max_in_flight.max(1))),
        })
    }

    /// Number of priming requests that could start right now.
    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }
}

impl ResourcePreloaderPort for HttpPreloader {
    fn preload(&self, item: &Item) {
        let Ok(url) = url::Url::parse(&item.resource_url) else {
            tracing::debug!(
                target: "feedq.http",
                id = %item.id,
                locator = %item.resource_url,
                "Skipping preload of unparsable locator"
            );
            return;
        };

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::debug!(target: "feedq.http", id = %item.id, "No runtime, skipping preload");
            return;
        };

        let client = self.client.clone();
        let permits = Arc::clone(&self.permits);
        let id = item.id.clone();

        handle.spawn(async move {
            let Ok(_permit) = permits.acquire_owned().await else {
                return;
            };

            let result = async {
                let response = client.get(url.as_str()).send().await?.error_for_status()?;
                response.bytes().await.map(|body| body.len())
            }
            .await;

            match result {
                Ok(bytes) => {
                    tracing::trace!(target: "feedq.http", %id, bytes, "Resource primed");
                }
                Err(e) => {
                    tracing::debug!(target: "feedq.http", %id, error = %e, "Resource preload failed");
                }
            }
        });
    }
}
