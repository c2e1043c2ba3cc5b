//! Feed queue port definition.
//!
//! The consumer-facing surface of the prefetch queue manager. Adapters
//! (CLI, UI bindings) hold an `Arc<dyn FeedQueuePort>` and never see the
//! concrete manager.

use async_trait::async_trait;

use crate::domain::Item;

/// Port for consuming a prefetched feed.
///
/// None of these methods fail: fetch failures surface through
/// [`FeedQueuePort::last_error`], and storage failures are absorbed.
#[async_trait]
pub trait FeedQueuePort: Send + Sync {
    /// Hydrate from the persisted snapshot and start the initial fetch if
    /// the queue is still empty. Idempotent while active.
    async fn activate(&self);

    /// The head item, without removing it.
    async fn current(&self) -> Option<Item>;

    /// Number of buffered items.
    async fn len(&self) -> usize;

    /// Whether the queue is empty.
    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// True exactly while a fetch is in flight.
    async fn is_loading(&self) -> bool;

    /// True when the provider had nothing more while the queue was empty.
    async fn is_exhausted(&self) -> bool;

    /// Message of the most recent failed fetch, cleared by a successful one.
    async fn last_error(&self) -> Option<String>;

    /// Remove the head item after the consumer has used it.
    async fn pop(&self);

    /// Drop every buffered item, reset all flags, and erase the snapshot.
    async fn clear(&self);

    /// Fetch now, subject to the single-fetch guard. Resolves when the
    /// attempt (this one or the one already in flight) completes.
    async fn refetch(&self);
}
