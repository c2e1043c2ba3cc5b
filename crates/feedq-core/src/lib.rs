//! Core domain types, ports, and configuration for feedq.
//!
//! This crate has no knowledge of HTTP, storage backends, or async runtimes.
//! Adapters implement the traits in [`ports`]; the prefetch manager in
//! `feedq-prefetch` composes them.

pub mod config;
pub mod domain;
pub mod events;
pub mod paths;
pub mod ports;

pub use config::{
    ConfigError, DEFAULT_BATCH_SIZE, DEFAULT_REFILL_THRESHOLD, DEFAULT_STORAGE_KEY,
    MAX_BATCH_SIZE, PrefetchConfig,
};
pub use domain::{Item, ItemId, RESOURCE_FIELDS};
pub use events::QueueEvent;
pub use paths::{PathError, data_root, snapshot_dir};
pub use ports::{
    FeedQueuePort, FetchError, FetchErrorKind, FetchResult, ItemSourcePort, NoopPreloader,
    NoopQueueEmitter, QueueEventEmitterPort, ResourcePreloaderPort, SnapshotStorePort,
    StorageError,
};
