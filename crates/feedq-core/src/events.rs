//! Queue change notifications.
//!
//! These events are "UI safe" - Clone + Debug + Serialize + Deserialize with
//! no infrastructure dependencies - so adapters can forward them over any
//! transport.

use serde::{Deserialize, Serialize};

/// Events emitted by the prefetch queue manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueueEvent {
    /// The queue contents changed (append, pop, restore, or clear).
    QueueChanged { length: usize },

    /// A fetch was issued.
    FetchStarted { requested: u32, excluded: usize },

    /// A fetch resolved and its results were merged.
    FetchCompleted { received: usize, appended: usize },

    /// The provider has nothing more and the local queue is empty.
    Exhausted,

    /// A fetch failed; `message` is what `last_error` reports.
    FetchFailed { message: String },

    /// The queue was reset by the consumer.
    Cleared,
}

impl QueueEvent {
    /// Short name for logging.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::QueueChanged { .. } => "queue_changed",
            Self::FetchStarted { .. } => "fetch_started",
            Self::FetchCompleted { .. } => "fetch_completed",
            Self::Exhausted => "exhausted",
            Self::FetchFailed { .. } => "fetch_failed",
            Self::Cleared => "cleared",
        }
    }
}
