//! Main CLI parser and global options.
//!
//! Every global option can also come from the environment (or a `.env`
//! file), so a configured shell only needs `feedq <command>`.

use std::path::PathBuf;

use clap::Parser;
use feedq_core::{DEFAULT_BATCH_SIZE, DEFAULT_REFILL_THRESHOLD};

use crate::commands::Commands;

/// Endpoint used when neither `--endpoint` nor `FEEDQ_ENDPOINT` is set.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/items/batch";

/// Command-line interface for the prefetching feed client.
#[derive(Parser)]
#[command(name = "feedq")]
#[command(about = "Consume a continuous content feed with a prefetched local queue")]
#[command(version)]
pub struct Cli {
    /// Batch endpoint answering `?count=N&exclude=a,b`
    #[arg(long, env = "FEEDQ_ENDPOINT", default_value = DEFAULT_ENDPOINT, global = true)]
    pub endpoint: String,

    /// Bearer token sent with fetch requests
    #[arg(long, env = "FEEDQ_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Items requested per fetch
    #[arg(long, env = "FEEDQ_BATCH_SIZE", default_value_t = DEFAULT_BATCH_SIZE, global = true)]
    pub batch_size: u32,

    /// Queue length below which a refill fires
    #[arg(long, env = "FEEDQ_REFILL_THRESHOLD", default_value_t = DEFAULT_REFILL_THRESHOLD, global = true)]
    pub refill_threshold: u32,

    /// Upper bound on one fetch attempt, in seconds
    #[arg(long = "fetch-timeout", env = "FEEDQ_FETCH_TIMEOUT", default_value_t = 30, global = true)]
    pub fetch_timeout_secs: u64,

    /// Keep the queue in memory only
    #[arg(long, env = "FEEDQ_NO_PERSIST", global = true)]
    pub no_persist: bool,

    /// Override the data directory for this invocation
    #[arg(long = "data-dir", env = "FEEDQ_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Download item resources in the background as they are queued
    #[arg(long, env = "FEEDQ_PRELOAD", global = true)]
    pub preload: bool,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
