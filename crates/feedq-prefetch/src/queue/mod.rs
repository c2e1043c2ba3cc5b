//! Item queue state.
//!
//! This module provides a pure state machine for the buffered feed.
//! No I/O is performed here; the orchestrator (`PrefetchManager`) handles
//! persistence, preloading, and notifications after each mutation.
//!
//! # Invariants
//!
//! - IDs are unique across the whole queue
//! - Items enter only at the tail and leave only from the head (or all at
//!   once via `clear`)
//! - Within one `append`, the caller's order is preserved

use std::collections::{HashSet, VecDeque};

use feedq_core::{Item, ItemId};
use serde_json::Value;

use crate::error::CorruptSnapshot;

/// FIFO buffer of unconsumed items with whole-queue deduplication.
///
/// This is a sync type with no internal locking - the caller
/// (`PrefetchManager`) is responsible for synchronization.
#[derive(Debug, Default, Clone)]
pub struct ItemQueue {
    items: VecDeque<Item>,
    ids: HashSet<ItemId>,
}

impl ItemQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of buffered items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the queue holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The head item, without removing it.
    pub fn head(&self) -> Option<&Item> {
        self.items.front()
    }

    /// Whether an item with `id` is buffered.
    pub fn contains(&self, id: &ItemId) -> bool {
        self.ids.contains(id)
    }

    /// IDs in queue order, head first.
    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }

    /// Iterate items head first.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Copy of the current contents, head first.
    pub fn to_vec(&self) -> Vec<Item> {
        self.items.iter().cloned().collect()
    }

    /// Append items at the tail, skipping any whose ID is already queued
    /// (including duplicates earlier in the same batch).
    ///
    /// Returns the number of items actually appended.
    pub fn append(&mut self, new_items: impl IntoIterator<Item = Item>) -> usize {
        let mut appended = 0;
        for item in new_items {
            if self.ids.insert(item.id.clone()) {
                self.items.push_back(item);
                appended += 1;
            }
        }
        appended
    }

    /// Remove and return the head item. No-op on an empty queue.
    pub fn pop_head(&mut self) -> Option<Item> {
        let item = self.items.pop_front()?;
        self.ids.remove(&item.id);
        Some(item)
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
        self.ids.clear();
    }

    /// Replace the contents with a persisted snapshot.
    ///
    /// The snapshot must be a JSON array of structurally valid items. On
    /// success the queue is replaced wholesale (repeated IDs keep their
    /// first occurrence) and the resulting length is returned. On failure
    /// the queue is left empty.
    pub fn restore(&mut self, snapshot: &Value) -> Result<usize, CorruptSnapshot> {
        self.clear();
        let restored = Self::parse_snapshot(snapshot)?;
        self.append(restored);
        Ok(self.len())
    }

    fn parse_snapshot(snapshot: &Value) -> Result<Vec<Item>, CorruptSnapshot> {
        let entries = snapshot.as_array().ok_or(CorruptSnapshot::NotAnArray)?;
        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                Item::from_json(entry).ok_or(CorruptSnapshot::InvalidEntry { index })
            })
            .collect()
    }
}
