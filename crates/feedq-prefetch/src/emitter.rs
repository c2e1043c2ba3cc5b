//! Broadcast-based event emitter.

use feedq_core::{QueueEvent, QueueEventEmitterPort};
use tokio::sync::broadcast;

/// Default channel capacity; slow subscribers lag rather than block.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Fans queue events out to any number of subscribers.
#[derive(Debug, Clone)]
pub struct BroadcastEmitter {
    tx: broadcast::Sender<QueueEvent>,
}

impl BroadcastEmitter {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Subscribe to events emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<QueueEvent> {
        self.tx.subscribe()
    }
}

impl Default for BroadcastEmitter {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

impl QueueEventEmitterPort for BroadcastEmitter {
    fn emit(&self, event: QueueEvent) {
        // No subscribers is not an error
        let _ = self.tx.send(event);
    }

    fn clone_box(&self) -> Box<dyn QueueEventEmitterPort> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive_events() {
        let emitter = BroadcastEmitter::default();
        let mut rx = emitter.subscribe();

        emitter.emit(QueueEvent::QueueChanged { length: 1 });
        emitter.clone_box().emit(QueueEvent::Cleared);

        assert_eq!(rx.recv().await.unwrap(), QueueEvent::QueueChanged { length: 1 });
        assert_eq!(rx.recv().await.unwrap(), QueueEvent::Cleared);
    }

    #[test]
    fn test_emit_without_subscribers() {
        BroadcastEmitter::new(0).emit(QueueEvent::Exhausted);
    }
}
