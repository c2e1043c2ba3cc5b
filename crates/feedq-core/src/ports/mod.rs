//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the prefetch core expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No `reqwest` or filesystem types in any signature
//! - Fire-and-forget capabilities (preload, emit) are synchronous
//! - I/O capabilities (fetch, storage) are async

pub mod event_emitter;
pub mod feed_queue;
pub mod fetch_error;
pub mod item_source;
pub mod preloader;
pub mod snapshot_store;

pub use event_emitter::{NoopQueueEmitter, QueueEventEmitterPort};
pub use feed_queue::FeedQueuePort;
pub use fetch_error::{FetchError, FetchErrorKind, FetchResult};
pub use item_source::ItemSourcePort;
pub use preloader::{NoopPreloader, ResourcePreloaderPort};
pub use snapshot_store::{SnapshotStorePort, StorageError};
