//! Prefetch queue manager for feedq.
//!
//! Keeps a consumer-facing FIFO of items supplied ahead of demand:
//!
//! - `queue` - Pure, deduplicating item queue (no I/O)
//! - `refill` - Refill policy flags and fetch leases
//! - `manager` - [`PrefetchManager`], the coordinator implementing
//!   `FeedQueuePort`
//! - `persistence` / `preload` - Snapshot and resource-priming policy
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use feedq_core::{ItemSourcePort, PrefetchConfig};
//! use feedq_prefetch::{PrefetchDeps, PrefetchManager};
//!
//! # async fn run(source: Arc<dyn ItemSourcePort>) -> Result<(), feedq_prefetch::PrefetchError> {
//! let manager = PrefetchManager::new(PrefetchDeps::new(source, PrefetchConfig::new()))?;
//! manager.activate().await;
//! if let Some(item) = manager.current().await {
//!     println!("{}", item.resource_url);
//!     manager.pop().await;
//! }
//! # Ok(())
//! # }
//! ```

// Re-export core types for convenience
pub use feedq_core::{FeedQueuePort, Item, ItemId, PrefetchConfig, QueueEvent};

mod emitter;
mod error;
mod manager;
mod persistence;
mod preload;
pub(crate) mod queue;
pub(crate) mod refill;

pub use emitter::{BroadcastEmitter, DEFAULT_EVENT_CAPACITY};
pub use error::{CorruptSnapshot, PrefetchError};
pub use manager::{PrefetchDeps, PrefetchManager};
pub use queue::ItemQueue;
pub use refill::{FetchLease, FetchProgress, FetchTrigger};
