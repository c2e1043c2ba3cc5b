//! Prefetch manager implementation.
//!
//! This module provides the concrete implementation of `FeedQueuePort`: an
//! explicit coordinator owning the item queue, the refill flags, snapshot
//! persistence, and resource priming.
//!
//! # Concurrency Model
//!
//! - One `Mutex<QueueState>` guards the queue and the refill flags together,
//!   so a mutation and the refill decision that follows it are atomic
//! - Fetches run on a spawned task, outside the state lock
//! - Lease tokens prevent stale commits after `clear`
//! - A fetch task that merges items claims any follow-up refill under the
//!   same lock hold and loops, instead of spawning a new task
//! - `sync_lock` serializes snapshot writes and priming; each holder copies
//!   the latest queue, so the last write always reflects the newest state
//! - Progress is only sent while the state lock is held, so the watch
//!   channel never moves back to a value the state has already left
//! - Lock order: `sync_lock` → `state` → `preloads`

mod port;

use std::sync::Arc;

use feedq_core::{
    FetchError, FetchResult, Item, ItemId, ItemSourcePort, NoopPreloader, NoopQueueEmitter,
    PrefetchConfig, QueueEvent, QueueEventEmitterPort, ResourcePreloaderPort, SnapshotStorePort,
};
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

use crate::error::PrefetchError;
use crate::persistence::SnapshotPersistence;
use crate::preload::PreloadTracker;
use crate::queue::ItemQueue;
use crate::refill::{FetchLease, FetchOutcome, FetchProgress, FetchTrigger, RefillState};

/// Dependencies for creating a prefetch manager.
///
/// Only the item source is required. Without a store the queue lives in
/// memory only; without a preloader or emitter those concerns are no-ops.
pub struct PrefetchDeps {
    /// Port for fetching new items.
    pub source: Arc<dyn ItemSourcePort>,
    /// Port for persisting the queue snapshot.
    pub store: Option<Arc<dyn SnapshotStorePort>>,
    /// Port for priming item resources.
    pub preloader: Arc<dyn ResourcePreloaderPort>,
    /// Port for emitting queue events.
    pub emitter: Arc<dyn QueueEventEmitterPort>,
    /// Configuration for the manager.
    pub config: PrefetchConfig,
}

impl PrefetchDeps {
    pub fn new(source: Arc<dyn ItemSourcePort>, config: PrefetchConfig) -> Self {
        Self {
            source,
            store: None,
            preloader: Arc::new(NoopPreloader::new()),
            emitter: Arc::new(NoopQueueEmitter::new()),
            config,
        }
    }

    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn SnapshotStorePort>) -> Self {
        self.store = Some(store);
        self
    }

    #[must_use]
    pub fn with_preloader(mut self, preloader: Arc<dyn ResourcePreloaderPort>) -> Self {
        self.preloader = preloader;
        self
    }

    #[must_use]
    pub fn with_emitter(mut self, emitter: Arc<dyn QueueEventEmitterPort>) -> Self {
        self.emitter = emitter;
        self
    }
}

/// Queue contents plus the flags deciding when to refill it.
#[derive(Debug, Default)]
struct QueueState {
    queue: ItemQueue,
    refill: RefillState,
}

/// A claimed fetch, ready to run.
#[derive(Debug)]
struct FetchClaim {
    lease: FetchLease,
    trigger: FetchTrigger,
    exclude: Vec<ItemId>,
}

struct ManagerInner {
    config: PrefetchConfig,
    threshold: usize,
    source: Arc<dyn ItemSourcePort>,
    persistence: SnapshotPersistence,
    preloader: Arc<dyn ResourcePreloaderPort>,
    emitter: Arc<dyn QueueEventEmitterPort>,
    state: Mutex<QueueState>,
    preloads: Mutex<PreloadTracker>,
    sync_lock: Mutex<()>,
    progress_tx: watch::Sender<FetchProgress>,
}

/// Concrete prefetch queue manager.
///
/// Cheap to clone; clones share the same queue. Adapters should typically
/// hold `Arc<dyn FeedQueuePort>` rather than this type.
#[derive(Clone)]
pub struct PrefetchManager {
    inner: Arc<ManagerInner>,
}

impl PrefetchManager {
    /// Build a manager from its dependencies.
    ///
    /// Nothing is read or fetched until [`PrefetchManager::activate`].
    pub fn new(deps: PrefetchDeps) -> Result<Self, PrefetchError> {
        deps.config.validate()?;

        let threshold = usize::try_from(deps.config.refill_threshold).unwrap_or(usize::MAX);
        let persistence = SnapshotPersistence::new(&deps.config, deps.store);
        let (progress_tx, _rx) = watch::channel(FetchProgress::default());

        Ok(Self {
            inner: Arc::new(ManagerInner {
                config: deps.config,
                threshold,
                source: deps.source,
                persistence,
                preloader: deps.preloader,
                emitter: deps.emitter,
                state: Mutex::new(QueueState::default()),
                preloads: Mutex::new(PreloadTracker::new()),
                sync_lock: Mutex::new(()),
                progress_tx,
            }),
        })
    }

    /// The configuration this manager was built with.
    pub fn config(&self) -> &PrefetchConfig {
        &self.inner.config
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Hydrate from the persisted snapshot, then fetch if the queue is empty
    /// (or refill if the restored queue is already below the low-water mark).
    ///
    /// A no-op while active. After [`PrefetchManager::clear`] the next call
    /// behaves like the first.
    pub async fn activate(&self) {
        {
            let mut state = self.inner.state.lock().await;
            if state.refill.is_active() {
                return;
            }
            state.refill.set_active(true);
        }
        info!(target: "feedq.prefetch", persist = self.inner.persistence.is_enabled(), "Activating prefetch queue");

        if let Some(snapshot) = self.inner.persistence.load().await {
            if self.restore(&snapshot).await {
                self.publish_change().await;
            }
        }

        let claim = {
            let mut guard = self.inner.state.lock().await;
            let trigger = if guard.queue.is_empty() {
                FetchTrigger::Activation
            } else {
                FetchTrigger::LowWater
            };
            let claim = self.claim_locked(&mut guard, trigger);
            self.publish_progress_locked(&guard);
            claim
        };

        if let Some(claim) = claim {
            self.launch(claim);
        }
    }

    /// Apply a snapshot. Returns whether the queue changed.
    async fn restore(&self, snapshot: &serde_json::Value) -> bool {
        let result = {
            let mut state = self.inner.state.lock().await;
            if !state.refill.is_active() || !state.queue.is_empty() {
                // Cleared mid-activation, or a manual fetch already filled it
                return false;
            }
            state.queue.restore(snapshot)
        };

        match result {
            Ok(restored) => {
                info!(target: "feedq.prefetch", restored, "Restored queue snapshot");
                restored > 0
            }
            Err(e) => {
                warn!(target: "feedq.prefetch", error = %e, "Discarding corrupt queue snapshot");
                self.inner.persistence.erase().await;
                false
            }
        }
    }

    // =========================================================================
    // Consumer operations
    // =========================================================================

    /// Remove the head item, then evaluate the refill policy.
    ///
    /// If the queue is left empty and not exhausted a refill is started,
    /// even when this call found the queue already empty.
    pub async fn pop(&self) {
        let (popped, claim) = {
            let mut guard = self.inner.state.lock().await;
            let popped = guard.queue.pop_head();
            let claim = if guard.queue.is_empty() {
                self.claim_locked(&mut guard, FetchTrigger::Drained)
            } else if popped.is_some() {
                self.claim_locked(&mut guard, FetchTrigger::LowWater)
            } else {
                None
            };
            if claim.is_some() {
                self.publish_progress_locked(&guard);
            }
            (popped, claim)
        };

        if let Some(item) = popped {
            debug!(target: "feedq.prefetch", id = %item.id, "Popped item");
            self.publish_change().await;
        }

        if let Some(claim) = claim {
            self.launch(claim);
        }
    }

    /// Drop every item, reset all flags, erase the snapshot, and deactivate.
    ///
    /// A fetch in flight has its lease revoked; its result is discarded.
    pub async fn clear(&self) {
        let _sync = self.inner.sync_lock.lock().await;

        let (dropped, revoked) = {
            let mut state = self.inner.state.lock().await;
            let dropped = state.queue.len();
            state.queue.clear();
            let revoked = state.refill.reset();
            self.publish_progress_locked(&state);
            (dropped, revoked)
        };

        if let Some(lease) = revoked {
            debug!(target: "feedq.prefetch", %lease, "Revoked in-flight fetch");
        }

        self.inner.preloads.lock().await.reset();
        self.inner.persistence.erase().await;

        info!(target: "feedq.prefetch", dropped, "Cleared queue");
        self.inner.emitter.emit(QueueEvent::QueueChanged { length: 0 });
        self.inner.emitter.emit(QueueEvent::Cleared);
    }

    /// Fetch now, subject to the single-fetch guard.
    ///
    /// Ignores the exhausted flag. If a fetch is already in flight, no
    /// request is issued and this waits for that one instead.
    pub async fn refetch(&self) {
        let (claim, target) = {
            let mut guard = self.inner.state.lock().await;
            if let Some(lease) = guard.refill.in_flight() {
                (None, lease)
            } else {
                let Some(claim) = self.claim_locked(&mut guard, FetchTrigger::Manual) else {
                    return;
                };
                self.publish_progress_locked(&guard);
                let lease = claim.lease;
                (Some(claim), lease)
            }
        };

        if let Some(claim) = claim {
            self.launch(claim);
        } else {
            debug!(target: "feedq.prefetch", %target, "Refetch joined in-flight fetch");
        }

        let mut rx = self.inner.progress_tx.subscribe();
        // The sender lives as long as `self`
        let _ = rx.wait_for(|progress| progress.has_settled(target)).await;
    }

    /// Resolve once no fetch is in flight.
    pub async fn wait_idle(&self) {
        let mut rx = self.inner.progress_tx.subscribe();
        let _ = rx.wait_for(|progress| !progress.loading).await;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The head item, without removing it.
    pub async fn current(&self) -> Option<Item> {
        self.inner.state.lock().await.queue.head().cloned()
    }

    /// Number of buffered items.
    pub async fn len(&self) -> usize {
        self.inner.state.lock().await.queue.len()
    }

    /// Whether the queue is empty.
    pub async fn is_empty(&self) -> bool {
        self.inner.state.lock().await.queue.is_empty()
    }

    /// True exactly while a fetch is in flight.
    pub async fn is_loading(&self) -> bool {
        self.inner.state.lock().await.refill.is_fetching()
    }

    pub async fn is_exhausted(&self) -> bool {
        self.inner.state.lock().await.refill.is_exhausted()
    }

    pub async fn last_error(&self) -> Option<String> {
        self.inner
            .state
            .lock()
            .await
            .refill
            .last_error()
            .map(String::from)
    }

    /// Copy of the buffered items, head first.
    pub async fn items(&self) -> Vec<Item> {
        self.inner.state.lock().await.queue.to_vec()
    }

    // =========================================================================
    // Fetch pipeline
    // =========================================================================

    /// Check the refill policy for `trigger` and claim a lease if allowed.
    ///
    /// Must be called with the state lock held. The caller publishes the new
    /// progress before releasing it.
    fn claim_locked(&self, state: &mut QueueState, trigger: FetchTrigger) -> Option<FetchClaim> {
        let lease = state
            .refill
            .claim(trigger, state.queue.len(), self.inner.threshold)?;

        Some(FetchClaim {
            lease,
            trigger,
            exclude: state.queue.ids(),
        })
    }

    fn announce(&self, claim: &FetchClaim) {
        debug!(
            target: "feedq.prefetch",
            lease = %claim.lease,
            trigger = %claim.trigger,
            excluded = claim.exclude.len(),
            "Starting fetch"
        );
        self.inner.emitter.emit(QueueEvent::FetchStarted {
            requested: self.inner.config.batch_size,
            excluded: claim.exclude.len(),
        });
    }

    /// Spawn the fetch task for a claimed lease.
    fn launch(&self, claim: FetchClaim) {
        self.announce(&claim);
        let manager = self.clone();
        tokio::spawn(manager.run_fetches(claim));
    }

    /// Run a claimed fetch, then any follow-up refill it leads to.
    async fn run_fetches(self, mut claim: FetchClaim) {
        loop {
            let result = self.fetch(&claim.exclude).await;
            match self.complete(claim.lease, result).await {
                Some(next) => {
                    self.announce(&next);
                    claim = next;
                }
                None => break,
            }
        }
    }

    /// One bounded call to the item source.
    async fn fetch(&self, exclude: &[ItemId]) -> FetchResult<Vec<Item>> {
        let limit = self.inner.config.fetch_timeout;
        let request = self.inner.source.fetch_batch(self.inner.config.batch_size, exclude);

        tokio::time::timeout(limit, request)
            .await
            .unwrap_or(Err(FetchError::Timeout { after: limit }))
    }

    /// Commit a fetch result if `lease` is still current.
    ///
    /// Returns a follow-up claim when the merge left the queue below the
    /// low-water mark.
    async fn complete(
        &self,
        lease: FetchLease,
        result: FetchResult<Vec<Item>>,
    ) -> Option<FetchClaim> {
        let (outcome, next) = {
            let mut guard = self.inner.state.lock().await;
            let state = &mut *guard;

            if !state.refill.finish(lease) {
                debug!(target: "feedq.prefetch", %lease, "Ignoring stale fetch result (lease revoked)");
                return None;
            }

            let outcome = match result {
                Ok(items) if items.is_empty() => state.refill.record_empty(state.queue.len()),
                Ok(items) => {
                    let received = items.len();
                    let appended = state.queue.append(items);
                    state.refill.record_items(received, appended)
                }
                Err(e) => state.refill.record_failure(e.to_string()),
            };

            // Low-water is only re-evaluated when the length changed
            let next = if matches!(outcome, FetchOutcome::Merged { appended, .. } if appended > 0) {
                self.claim_locked(state, FetchTrigger::LowWater)
            } else {
                None
            };

            (outcome, next)
        };

        match outcome {
            FetchOutcome::Merged { received, appended } => {
                info!(target: "feedq.prefetch", %lease, received, appended, "Fetch completed");
                self.inner
                    .emitter
                    .emit(QueueEvent::FetchCompleted { received, appended });
                if appended > 0 {
                    self.publish_change().await;
                }
            }
            FetchOutcome::Empty { exhausted } => {
                info!(target: "feedq.prefetch", %lease, exhausted, "Provider returned no items");
                self.inner.emitter.emit(QueueEvent::FetchCompleted {
                    received: 0,
                    appended: 0,
                });
                if exhausted {
                    self.inner.emitter.emit(QueueEvent::Exhausted);
                }
            }
            FetchOutcome::Failed { message } => {
                warn!(target: "feedq.prefetch", %lease, error = %message, "Fetch failed");
                self.inner.emitter.emit(QueueEvent::FetchFailed { message });
            }
        }

        // Waiters wake only after the result is persisted and announced
        self.publish_progress().await;
        next
    }

    async fn publish_progress(&self) {
        let state = self.inner.state.lock().await;
        self.publish_progress_locked(&state);
    }

    /// Send the current progress. The caller holds the state lock.
    fn publish_progress_locked(&self, state: &QueueState) {
        self.inner.progress_tx.send_replace(state.refill.progress());
    }

    /// Persist, prime, and announce the current queue after a length change.
    async fn publish_change(&self) {
        let _sync = self.inner.sync_lock.lock().await;

        let items = self.inner.state.lock().await.queue.to_vec();
        self.inner.persistence.save(&items).await;

        let primed = self
            .inner
            .preloads
            .lock()
            .await
            .prime_all(&items, self.inner.preloader.as_ref());
        if primed > 0 {
            debug!(target: "feedq.prefetch", primed, "Primed item resources");
        }

        self.inner
            .emitter
            .emit(QueueEvent::QueueChanged { length: items.len() });
    }
}
