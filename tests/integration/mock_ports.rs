//! Mock port adapters for integration tests.
//!
//! The clock is shared through an `Rc<Cell<_>>` so a test can move one
//! handle into the engine and keep another to advance time.

use heaterfuel::app::events::EngineEvent;
use heaterfuel::app::ports::{Clock, EventSink, SnapshotStore, StorageError};
use heaterfuel::adapters::MemorySnapshotStore;
use heaterfuel::{EngineConfig, FuelAccountingEngine};
use std::cell::Cell;
use std::rc::Rc;

/// 2026-01-01T00:00:00Z
pub const T0_MILLIS: i64 = 1_767_225_600_000;

// ── ManualClock ───────────────────────────────────────────────

#[derive(Clone)]
pub struct ManualClock {
    now: Rc<Cell<i64>>,
}

#[allow(dead_code)]
impl ManualClock {
    pub fn new(start_millis: i64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_millis)),
        }
    }

    pub fn advance_secs(&self, secs: i64) {
        self.now.set(self.now.get() + secs * 1000);
    }

    pub fn advance_millis(&self, ms: i64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set_millis(&self, ms: i64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.get()
    }
}

// ── FailingStore ──────────────────────────────────────────────

/// Loads a fixed snapshot and refuses every write.
pub struct FailingStore {
    pub text: Option<String>,
}

impl SnapshotStore for FailingStore {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.text.clone())
    }

    fn save(&mut self, _text: &str) -> Result<(), StorageError> {
        Err(StorageError::IoError)
    }

    fn delete(&mut self) -> Result<(), StorageError> {
        Err(StorageError::IoError)
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<EngineEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&EngineEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn saw_fatal(&self) -> bool {
        self.events.iter().any(EngineEvent::requires_acknowledgement)
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &EngineEvent) {
        self.events.push(event.clone());
    }
}

// ── Builders ──────────────────────────────────────────────────

pub type TestEngine = FuelAccountingEngine<MemorySnapshotStore, ManualClock>;

/// Engine over an in-memory store, optionally pre-seeded, already initialized.
pub fn make_engine(seed: Option<&str>) -> (TestEngine, ManualClock, RecordingSink) {
    let clock = ManualClock::new(T0_MILLIS);
    let store = match seed {
        Some(text) => MemorySnapshotStore::with_snapshot(text),
        None => MemorySnapshotStore::new(),
    };
    let mut engine = FuelAccountingEngine::new(EngineConfig::default(), store, clock.clone());
    let mut sink = RecordingSink::new();
    engine.initialize(&mut sink);
    (engine, clock, sink)
}
