//! Command handlers.
//!
//! Each handler takes the composed [`CliContext`](crate::CliContext) and
//! drives the prefetch manager through its public operations only.

pub mod clear;
pub mod list;
pub mod peek;
pub mod pop;
pub mod refetch;
pub mod status;
pub mod watch;

use feedq_prefetch::PrefetchManager;

/// Activate the queue and wait for any fetch it started.
pub(crate) async fn ready(manager: &PrefetchManager) {
    manager.activate().await;
    manager.wait_idle().await;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;
    use feedq_core::{FetchError, FetchResult, Item, ItemId, ItemSourcePort, PrefetchConfig};
    use feedq_prefetch::{BroadcastEmitter, PrefetchDeps, PrefetchManager};

    use crate::bootstrap::CliContext;
    use crate::error::CliError;

    /// Serves `batches` numbered batches, then fails or runs dry.
    struct CountingSource {
        batches: u32,
        fail_after: bool,
        calls: AtomicU32,
    }

    #[async_trait]
    impl ItemSourcePort for CountingSource {
        async fn fetch_batch(&self, count: u32, _exclude: &[ItemId]) -> FetchResult<Vec<Item>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call >= self.batches {
                if self.fail_after {
                    return Err(FetchError::transport("connection refused"));
                }
                return Ok(Vec::new());
            }
            Ok((0..count)
                .map(|n| {
                    let id = call * count + n;
                    Item::new(id.to_string(), format!("https://cdn/{id}.jpg"))
                })
                .collect())
        }
    }

    fn context(batches: u32, fail_after: bool) -> CliContext {
        let source = CountingSource {
            batches,
            fail_after,
            calls: AtomicU32::new(0),
        };
        let config = PrefetchConfig::new()
            .with_batch_size(4)
            .with_refill_threshold(2)
            .with_persist(false);
        let events = BroadcastEmitter::default();
        let deps = PrefetchDeps::new(Arc::new(source), config)
            .with_emitter(Arc::new(events.clone()));
        CliContext {
            manager: PrefetchManager::new(deps).unwrap(),
            events,
            snapshot_file: None,
        }
    }

    #[tokio::test]
    async fn test_pop_consumes_across_refills() {
        let ctx = context(3, false);
        super::pop::execute(&ctx, 6).await.unwrap();

        // One low-water refill; the remaining two sit at the threshold
        assert_eq!(ctx.manager.len().await, 2);
        assert_eq!(ctx.manager.current().await.unwrap().id.as_str(), "6");
    }

    #[tokio::test]
    async fn test_pop_stops_when_feed_runs_dry() {
        let ctx = context(1, false);
        super::pop::execute(&ctx, 10).await.unwrap();

        assert!(ctx.manager.is_empty().await);
        assert!(ctx.manager.is_exhausted().await);
    }

    #[tokio::test]
    async fn test_refetch_failure_maps_to_fetch_error() {
        let ctx = context(1, true);
        let err = super::refetch::execute(&ctx).await.unwrap_err();

        let cli_error = err.downcast_ref::<CliError>().unwrap();
        assert_eq!(cli_error.exit_code(), 69);
        // The activation batch is still buffered
        assert_eq!(ctx.manager.len().await, 4);
    }

    #[tokio::test]
    async fn test_clear_does_not_fetch() {
        let ctx = context(1, false);
        super::clear::execute(&ctx).await.unwrap();

        assert!(ctx.manager.is_empty().await);
        assert!(!ctx.manager.is_loading().await);
    }
}
