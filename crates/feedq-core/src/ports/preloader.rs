//! Resource preloader port.
//!
//! Priming an item's resource is a platform capability: a desktop client
//! warms an HTTP cache, a server-driven feed may do nothing at all.

use crate::domain::Item;

/// Port for priming an item's external resource.
///
/// `preload` is fire-and-forget. It must not block, must not fail, and
/// implementations are expected to spawn their own background work. The
/// caller already suppresses repeat calls for the same locator.
pub trait ResourcePreloaderPort: Send + Sync {
    /// Begin priming the resource behind `item.resource_url`.
    fn preload(&self, item: &Item);
}

/// A preloader that does nothing.
///
/// Suitable for tests, headless consumers, and targets with no cache to warm.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPreloader;

impl NoopPreloader {
    /// Create a new no-op preloader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ResourcePreloaderPort for NoopPreloader {
    fn preload(&self, _item: &Item) {}
}
