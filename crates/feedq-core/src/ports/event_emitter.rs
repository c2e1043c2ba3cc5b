//! Queue event emitter port.
//!
//! This port lets the prefetch manager announce changes without coupling to
//! a transport (channels, UI bindings, logs).

use crate::events::QueueEvent;

/// Observer for queue changes.
///
/// `NoopQueueEmitter` suits consumers that poll; `feedq-prefetch` ships a
/// broadcast-backed emitter for consumers that subscribe.
pub trait QueueEventEmitterPort: Send + Sync {
    /// Called from inside manager operations, sometimes with a lock held.
    /// Must return promptly and must not call back into the manager.
    fn emit(&self, event: QueueEvent);

    /// Boxed copy sharing the same sink.
    fn clone_box(&self) -> Box<dyn QueueEventEmitterPort>;
}

/// Drops every event.
#[derive(Debug, Clone, Default)]
pub struct NoopQueueEmitter;

impl NoopQueueEmitter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl QueueEventEmitterPort for NoopQueueEmitter {
    fn emit(&self, _event: QueueEvent) {}

    fn clone_box(&self) -> Box<dyn QueueEventEmitterPort> {
        Box::new(self.clone())
    }
}
