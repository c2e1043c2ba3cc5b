//! `FeedQueuePort` implementation for `PrefetchManager`.

use async_trait::async_trait;
use feedq_core::{FeedQueuePort, Item};

use super::PrefetchManager;

#[async_trait]
impl FeedQueuePort for PrefetchManager {
    async fn activate(&self) {
        Self::activate(self).await;
    }

    async fn current(&self) -> Option<Item> {
        Self::current(self).await
    }

    async fn len(&self) -> usize {
        Self::len(self).await
    }

    async fn is_empty(&self) -> bool {
        Self::is_empty(self).await
    }

    async fn is_loading(&self) -> bool {
        Self::is_loading(self).await
    }

    async fn is_exhausted(&self) -> bool {
        Self::is_exhausted(self).await
    }

    async fn last_error(&self) -> Option<String> {
        Self::last_error(self).await
    }

    async fn pop(&self) {
        Self::pop(self).await;
    }

    async fn clear(&self) {
        Self::clear(self).await;
    }

    async fn refetch(&self) {
        Self::refetch(self).await;
    }
}
