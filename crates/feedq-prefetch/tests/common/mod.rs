//! Shared fakes for prefetch manager integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use feedq_core::{
    FetchError, FetchResult, Item, ItemId, ItemSourcePort, QueueEvent, QueueEventEmitterPort,
    ResourcePreloaderPort, SnapshotStorePort, StorageError,
};
use feedq_prefetch::{PrefetchConfig, PrefetchDeps, PrefetchManager};
use tokio::sync::Notify;

// ── Items ──────────────────────────────────────────────────────────

pub fn item(id: &str) -> Item {
    Item::new(id, format!("https://cdn.example/{id}.jpg"))
}

pub fn items(ids: &[&str]) -> Vec<Item> {
    ids.iter().map(|id| item(id)).collect()
}

pub fn ids_of(items: &[Item]) -> Vec<String> {
    items.iter().map(|i| i.id.to_string()).collect()
}

/// Config with persistence off and a 10/3 batch policy.
pub fn memory_config() -> PrefetchConfig {
    PrefetchConfig::new()
        .with_batch_size(10)
        .with_refill_threshold(3)
        .with_persist(false)
}

// ── Scripted item source ───────────────────────────────────────────

/// One scripted answer from the fake provider.
pub enum Reply {
    Items(Vec<Item>),
    Fail(FetchError),
    /// Wait for the gate to be opened, then return the items.
    Gated(Arc<Notify>, Vec<Item>),
    /// Never resolve.
    Hang,
}

/// A recorded `fetch_batch` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub count: u32,
    pub exclude: Vec<String>,
}

/// Item source answering from a script. Once the script runs out every
/// call returns an empty batch.
#[derive(Clone, Default)]
pub struct ScriptedSource {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, reply: Reply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn then_items(self, ids: &[&str]) -> Self {
        self.push(Reply::Items(items(ids)));
        self
    }

    pub fn then(self, reply: Reply) -> Self {
        self.push(reply);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ItemSourcePort for ScriptedSource {
    async fn fetch_batch(&self, count: u32, exclude: &[ItemId]) -> FetchResult<Vec<Item>> {
        self.calls.lock().unwrap().push(Call {
            count,
            exclude: exclude.iter().map(ToString::to_string).collect(),
        });

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            None => Ok(Vec::new()),
            Some(Reply::Items(items)) => Ok(items),
            Some(Reply::Fail(err)) => Err(err),
            Some(Reply::Gated(gate, items)) => {
                gate.notified().await;
                Ok(items)
            }
            Some(Reply::Hang) => std::future::pending().await,
        }
    }
}

// ── Recording emitter ──────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct RecordingEmitter {
    events: Arc<Mutex<Vec<QueueEvent>>>,
}

impl RecordingEmitter {
    pub fn events(&self) -> Vec<QueueEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.events().iter().filter(|e| e.name() == name).count()
    }
}

impl QueueEventEmitterPort for RecordingEmitter {
    fn emit(&self, event: QueueEvent) {
        self.events.lock().unwrap().push(event);
    }

    fn clone_box(&self) -> Box<dyn QueueEventEmitterPort> {
        Box::new(self.clone())
    }
}

// ── Recording preloader ────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct RecordingPreloader {
    primed: Arc<Mutex<Vec<String>>>,
}

impl RecordingPreloader {
    pub fn primed(&self) -> Vec<String> {
        self.primed.lock().unwrap().clone()
    }
}

impl ResourcePreloaderPort for RecordingPreloader {
    fn preload(&self, item: &Item) {
        self.primed.lock().unwrap().push(item.resource_url.clone());
    }
}

// ── Failing store ──────────────────────────────────────────────────

/// Store whose every operation fails.
pub struct FailingStore;

#[async_trait]
impl SnapshotStorePort for FailingStore {
    async fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable {
            message: "quota exceeded".to_string(),
        })
    }

    async fn write(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::io(key, "quota exceeded"))
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        Err(StorageError::io(key, "quota exceeded"))
    }
}

// ── Harness ────────────────────────────────────────────────────────

/// A manager wired to recording fakes.
pub struct Harness {
    pub manager: PrefetchManager,
    pub source: ScriptedSource,
    pub emitter: RecordingEmitter,
    pub preloader: RecordingPreloader,
}

impl Harness {
    pub fn new(source: ScriptedSource, config: PrefetchConfig) -> Self {
        Self::with_deps(source, config, |deps| deps)
    }

    pub fn with_deps(
        source: ScriptedSource,
        config: PrefetchConfig,
        customize: impl FnOnce(PrefetchDeps) -> PrefetchDeps,
    ) -> Self {
        let emitter = RecordingEmitter::default();
        let preloader = RecordingPreloader::default();
        let deps = PrefetchDeps::new(Arc::new(source.clone()), config)
            .with_emitter(Arc::new(emitter.clone()))
            .with_preloader(Arc::new(preloader.clone()));

        Self {
            manager: PrefetchManager::new(customize(deps)).unwrap(),
            source,
            emitter,
            preloader,
        }
    }

    /// Activate and wait for every resulting fetch to settle.
    pub async fn activate(&self) {
        self.manager.activate().await;
        self.manager.wait_idle().await;
    }

    /// Pop and wait for any resulting fetch to settle.
    pub async fn pop(&self) {
        self.manager.pop().await;
        self.manager.wait_idle().await;
    }

    pub async fn queue_ids(&self) -> Vec<String> {
        ids_of(&self.manager.items().await)
    }
}

/// Let spawned tasks run to completion under a paused clock.
///
/// The clock only auto-advances once every task is blocked, so when this
/// returns any fetch that could finish has finished.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}
