//! Snapshot storage implementations for feedq.
//!
//! This crate provides implementations of the `SnapshotStorePort` trait
//! defined in `feedq-core`.

mod file;

#[cfg(any(test, feature = "test-utils"))]
mod memory;

pub use file::FileSnapshotStore;

#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemorySnapshotStore;
