//! Core domain types.
//!
//! Pure data with no infrastructure dependencies.

mod item;

pub use item::{Item, ItemId, RESOURCE_FIELDS};
