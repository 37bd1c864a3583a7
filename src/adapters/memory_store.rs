//! In-memory snapshot store.
//!
//! For hosts without a writable filesystem and for simulation.  Counts
//! writes so callers can verify the write-on-every-mutation behaviour.

use log::info;

use crate::app::ports::{SnapshotStore, StorageError};

#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    text: Option<String>,
    writes: usize,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        info!("MemorySnapshotStore: simulation backend");
        Self::default()
    }

    /// Pre-seeded with `text`, as if a previous session had saved it.
    pub fn with_snapshot(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            writes: 0,
        }
    }

    /// Current stored text.
    pub fn snapshot(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Number of successful `save` calls.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.text.clone())
    }

    fn save(&mut self, text: &str) -> Result<(), StorageError> {
        self.text = Some(text.to_owned());
        self.writes += 1;
        Ok(())
    }

    fn delete(&mut self) -> Result<(), StorageError> {
        self.text = None;
        Ok(())
    }
}
