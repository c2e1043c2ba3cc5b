//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - Item source (via feedq-http)
//! - Snapshot store (via feedq-store)
//! - Resource preloader (via feedq-http, opt-in)
//! - Prefetch manager (via feedq-prefetch)

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use feedq_core::paths::{ensure_directory, snapshot_dir};
use feedq_core::{NoopPreloader, PrefetchConfig, ResourcePreloaderPort};
use feedq_http::{DEFAULT_MAX_IN_FLIGHT, DefaultFeedClient, FeedClientConfig, HttpPreloader};
use feedq_prefetch::{BroadcastEmitter, PrefetchDeps, PrefetchManager};
use feedq_store::FileSnapshotStore;
use tracing::debug;

use crate::error::CliError;
use crate::parser::Cli;

/// Timeout for a single resource preload request.
const PRELOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Batch endpoint URL.
    pub endpoint: String,
    /// Optional bearer token.
    pub token: Option<String>,
    /// Queue policy.
    pub prefetch: PrefetchConfig,
    /// Data directory override; snapshots go in its `snapshots/` child.
    pub data_dir: Option<PathBuf>,
    /// Prime item resources over HTTP.
    pub preload: bool,
}

impl CliConfig {
    /// Build from parsed arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            endpoint: cli.endpoint.clone(),
            token: cli.token.clone(),
            prefetch: PrefetchConfig::new()
                .with_batch_size(cli.batch_size)
                .with_refill_threshold(cli.refill_threshold)
                .with_persist(!cli.no_persist)
                .with_fetch_timeout(Duration::from_secs(cli.fetch_timeout_secs)),
            data_dir: cli.data_dir.clone(),
            preload: cli.preload,
        }
    }

    /// Directory holding snapshot files, created if missing.
    pub fn snapshot_dir(&self) -> Result<PathBuf, CliError> {
        match &self.data_dir {
            Some(root) => {
                let dir = root.join("snapshots");
                ensure_directory(&dir)?;
                Ok(dir)
            }
            None => Ok(snapshot_dir()?),
        }
    }
}

/// Fully composed context for CLI commands.
pub struct CliContext {
    /// The prefetch queue.
    pub manager: PrefetchManager,
    /// Event fan-out; subscribe before acting to see every event.
    pub events: BroadcastEmitter,
    /// Snapshot file, if persistence is enabled.
    pub snapshot_file: Option<PathBuf>,
}

/// Wire the CLI's infrastructure.
pub fn bootstrap(config: &CliConfig) -> Result<CliContext, CliError> {
    config.prefetch.validate().map_err(|e| CliError::Config(e.to_string()))?;

    let client_config =
        FeedClientConfig::new(config.endpoint.clone()).with_optional_token(config.token.clone());
    let client = DefaultFeedClient::new(&client_config)?;

    let events = BroadcastEmitter::default();
    let mut deps = PrefetchDeps::new(Arc::new(client), config.prefetch.clone())
        .with_emitter(Arc::new(events.clone()))
        .with_preloader(preloader(config)?);

    let mut snapshot_file = None;
    if config.prefetch.persist {
        let store = FileSnapshotStore::new(config.snapshot_dir()?);
        snapshot_file = Some(store.path_for(&config.prefetch.storage_key));
        deps = deps.with_store(Arc::new(store));
    }

    debug!(
        endpoint = %config.endpoint,
        snapshot = ?snapshot_file,
        preload = config.preload,
        "Bootstrapped CLI context"
    );

    Ok(CliContext {
        manager: PrefetchManager::new(deps)?,
        events,
        snapshot_file,
    })
}

fn preloader(config: &CliConfig) -> Result<Arc<dyn ResourcePreloaderPort>, CliError> {
    if config.preload {
        Ok(Arc::new(HttpPreloader::new(
            PRELOAD_TIMEOUT,
            DEFAULT_MAX_IN_FLIGHT,
        )?))
    } else {
        Ok(Arc::new(NoopPreloader::new()))
    }
}
