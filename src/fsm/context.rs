//! The engine's single piece of mutable state.
//!
//! `EngineState` is the record that mode handlers read from and write to,
//! and the exact content of the persisted snapshot.  It is `Copy`: the
//! engine hands out values, never references into itself.

use serde::Serialize;

use super::Mode;
use crate::power::PowerLevel;

/// Complete fuel accounting state for one cylinder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineState {
    /// Weighted seconds of burn a full cylinder provides.  Grows during
    /// calibration, fixed afterwards.
    pub full_time: i64,
    /// Weighted seconds remaining.  Shrinks during Run and may go negative
    /// when usage exceeds the calibrated capacity.
    pub current_time: i64,
    /// Accounting mode.
    pub mode: Mode,
    /// Currently selected power level.
    pub power_level: PowerLevel,
    /// UNIX epoch seconds of the last power change.
    pub last_transition: i64,
}

impl EngineState {
    /// A fresh calibration: zero capacity, heater off, clock started at `now_secs`.
    pub fn calibration(now_secs: i64) -> Self {
        Self {
            full_time: 0,
            current_time: 0,
            mode: Mode::Calibration,
            power_level: PowerLevel::Off,
            last_transition: now_secs,
        }
    }

    /// Whole seconds since the last power change, truncated toward zero.
    ///
    /// `last_transition` has whole-second precision while `now_millis`
    /// does not; the difference is truncated before any multiplication.
    pub fn elapsed_secs(&self, now_millis: i64) -> i64 {
        now_millis.saturating_sub(self.last_transition.saturating_mul(1000)) / 1000
    }

    /// Weighted seconds accrued at the current power level up to `now_millis`.
    pub fn pending_delta(&self, now_millis: i64) -> i64 {
        if self.power_level.is_off() {
            return 0;
        }
        self.elapsed_secs(now_millis)
            .saturating_mul(self.power_level.multiplier())
    }
}
