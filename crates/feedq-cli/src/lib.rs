//! `feedq` command-line adapter.
//!
//! Drives a [`feedq_prefetch::PrefetchManager`] wired to the HTTP item
//! source and the file snapshot store. Each invocation hydrates the queue
//! from disk, runs one command, and leaves the snapshot up to date.

#![deny(unsafe_code)]

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod parser;
pub mod presentation;

pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;
