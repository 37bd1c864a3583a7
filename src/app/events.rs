//! Outbound engine events.
//!
//! The [`FuelAccountingEngine`](super::service::FuelAccountingEngine) emits
//! these through the [`EventSink`](super::ports::EventSink) port.  Adapters
//! on the other side decide what to do with them, e.g. log a line or raise the
//! fatal-error dialog.

use crate::app::ports::StorageError;
use crate::error::SnapshotError;
use crate::fsm::Mode;
use crate::power::PowerLevel;

/// Structured events emitted by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// A valid snapshot was restored (carries the restored mode).
    Started(Mode),

    /// The power level changed; `delta` weighted seconds were accounted.
    PowerChanged {
        from: PowerLevel,
        to: PowerLevel,
        delta: i64,
    },

    /// The accounting mode changed.
    ModeChanged { from: Mode, to: Mode },

    /// Counters were zeroed and a new calibration began.
    CalibrationReset,

    /// A mode switch was requested but the user declined.
    ModeSwitchDeclined(Mode),

    /// A malformed snapshot was thrown away.  Not user-visible.
    SnapshotDiscarded(SnapshotError),

    /// Unrecoverable state: all progress is lost.  The UI must show a
    /// blocking notice before continuing.
    FatalReset,

    /// The snapshot could not be written.  In-memory state is unaffected.
    PersistFailed(StorageError),
}

impl EngineEvent {
    /// `true` for events the user must acknowledge.
    pub fn requires_acknowledgement(&self) -> bool {
        matches!(self, Self::FatalReset)
    }
}
