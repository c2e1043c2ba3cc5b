//! Available subcommands.

use clap::Subcommand;

/// Operations on the local feed queue.
///
/// Every command except `clear` first activates the queue: the snapshot is
/// restored and, if needed, a fetch runs before the command proceeds.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the item at the head of the queue
    Peek,

    /// Consume items from the head of the queue
    Pop {
        /// Number of items to consume
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u32,
    },

    /// List every buffered item
    List,

    /// Fetch more items now, even if the feed was exhausted
    Refetch,

    /// Drop all buffered items and erase the snapshot
    Clear,

    /// Show queue length and fetch status
    Status,

    /// Consume items at a fixed pace, printing queue events as they happen
    Watch {
        /// Milliseconds between items
        #[arg(long, default_value_t = 2000)]
        interval_ms: u64,
        /// Stop after this many items
        #[arg(short = 'n', long)]
        limit: Option<u32>,
    },
}
