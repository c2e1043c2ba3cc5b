//! Port trait implementation for `FeedClient`.
//!
//! Implements the core-owned `ItemSourcePort` and maps internal HTTP errors
//! onto the three failure classes the core knows about.

use async_trait::async_trait;
use feedq_core::{FetchError, FetchResult, Item, ItemId, ItemSourcePort};

use crate::client::FeedClient;
use crate::error::FeedHttpError;
use crate::http::HttpBackend;

/// Sort an adapter error into the core failure classes.
fn map_error(err: FeedHttpError) -> FetchError {
    match err {
        FeedHttpError::Status { status, url } => FetchError::Protocol { status, url },
        FeedHttpError::Malformed(message) => FetchError::Shape { message },
        FeedHttpError::Json(e) => FetchError::shape(e.to_string()),
        // A body that fails to decode mid-stream is still a bad payload
        FeedHttpError::Transport(e) if e.is_decode() => FetchError::shape(e.to_string()),
        FeedHttpError::Transport(e) => FetchError::transport(e.to_string()),
        FeedHttpError::Url(e) => FetchError::Configuration {
            message: e.to_string(),
        },
    }
}

#[async_trait]
impl<B: HttpBackend + Send + Sync> ItemSourcePort for FeedClient<B> {
    async fn fetch_batch(&self, count: u32, exclude: &[ItemId]) -> FetchResult<Vec<Item>> {
        self.fetch_items(count, exclude).await.map_err(map_error)
    }
}
