//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ FuelAccountingEngine (domain)
//! ```
//!
//! Driven adapters (status file, wall clock, event sink) implement these
//! traits.  The [`FuelAccountingEngine`](super::service::FuelAccountingEngine)
//! consumes them via generics, so the domain core never touches the
//! filesystem or the system clock directly.
//!
//! All ports are synchronous.  There is exactly one writer.

// ───────────────────────────────────────────────────────────────
// Snapshot store (driven adapter: domain ↔ status file)
// ───────────────────────────────────────────────────────────────

/// Holds the single persisted snapshot.
///
/// Implementations replace the whole record on every `save`; there is no
/// partial update and no history.
pub trait SnapshotStore {
    /// Read the raw snapshot text.  `Ok(None)` when nothing is stored.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Replace the stored snapshot with `text`.
    fn save(&mut self, text: &str) -> Result<(), StorageError>;

    /// Remove the snapshot.  Returns `Ok(())` even if nothing was stored.
    fn delete(&mut self) -> Result<(), StorageError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: wall clock → domain)
// ───────────────────────────────────────────────────────────────

/// Wall-clock source.
///
/// Wall time rather than monotonic time: elapsed intervals must survive
/// the app being closed and reopened.
pub trait Clock {
    /// Milliseconds since the UNIX epoch.
    fn now_millis(&self) -> i64;

    /// Whole seconds since the UNIX epoch (floored).
    fn now_secs(&self) -> i64 {
        self.now_millis().div_euclid(1000)
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → UI / logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`EngineEvent`](super::events::EngineEvent)s
/// through this port.  The UI shell listens for
/// [`FatalReset`](super::events::EngineEvent::FatalReset) to show its
/// blocking notice; a log adapter records everything.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::EngineEvent);
}

/// Discards every event.
impl EventSink for () {
    fn emit(&mut self, _event: &super::events::EngineEvent) {}
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`SnapshotStore`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// The backing location could not be determined or created.
    Unavailable,
    /// Stored bytes are not valid UTF-8 text.
    NotText,
    /// Generic I/O error.
    IoError,
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "storage unavailable"),
            Self::NotText => write!(f, "stored data is not text"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for StorageError {}
