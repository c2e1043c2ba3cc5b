//! Item source port definition.
//!
//! This port abstracts the remote provider that hands out new items. The
//! prefetch manager depends only on this trait; the HTTP implementation
//! lives in `feedq-http`.

use async_trait::async_trait;

use super::fetch_error::FetchResult;
use crate::domain::{Item, ItemId};

/// Port for fetching batches of new items.
///
/// # Contract
///
/// - `count` is always positive.
/// - `exclude` lists the IDs currently held, in queue order, so the provider
///   can avoid returning them. Providers may ignore it; the caller dedups.
/// - An empty `Vec` is a valid "nothing available right now" answer, not an
///   error.
/// - Returned order is the provider's order and is preserved by the caller.
#[async_trait]
pub trait ItemSourcePort: Send + Sync {
    /// Fetch up to `count` items not in `exclude`.
    async fn fetch_batch(&self, count: u32, exclude: &[ItemId]) -> FetchResult<Vec<Item>>;
}
