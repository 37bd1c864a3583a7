//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing engine events to the `log` facade
//! as single-line `TAG | key=value` records.  Whatever logger the host
//! installs decides where they end up.

use log::{info, warn};

use crate::app::events::EngineEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`EngineEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &EngineEvent) {
        match event {
            EngineEvent::Started(mode) => {
                info!("START | mode={:?}", mode);
            }
            EngineEvent::PowerChanged { from, to, delta } => {
                info!("POWER | {:?} -> {:?} | delta={}s", from, to, delta);
            }
            EngineEvent::ModeChanged { from, to } => {
                info!("MODE | {:?} -> {:?}", from, to);
            }
            EngineEvent::CalibrationReset => {
                info!("CALIB | counters zeroed");
            }
            EngineEvent::ModeSwitchDeclined(mode) => {
                info!("MODE | switch from {:?} declined", mode);
            }
            EngineEvent::SnapshotDiscarded(e) => {
                warn!("SNAPSHOT | discarded: {}", e);
            }
            EngineEvent::FatalReset => {
                warn!("FATAL | all saved progress lost");
            }
            EngineEvent::PersistFailed(e) => {
                warn!("SNAPSHOT | write failed: {}", e);
            }
        }
    }
}
