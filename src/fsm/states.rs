//! Concrete mode handlers and table builder.
//!
//! ```text
//!  CALIBRATION ──[confirmed switch]──▶ RUN
//!       ▲                               │
//!       └──────[confirmed switch]───────┘
//!
//!  Any mode ──[bad mode tag]──▶ ERROR ──[delete + reinit]──▶ CALIBRATION
//! ```

use super::context::EngineState;
use super::{Mode, ModeDescriptor};
use crate::power::PowerLevel;
use log::{debug, warn};

/// Build the static mode table.  Called once per engine.
pub fn build_mode_table() -> [ModeDescriptor; Mode::COUNT] {
    [
        // Index 0: Calibration
        ModeDescriptor {
            mode: Mode::Calibration,
            name: "Calibration",
            on_enter: Some(calibration_enter),
            accrue: calibration_accrue,
        },
        // Index 1: Run
        ModeDescriptor {
            mode: Mode::Run,
            name: "Run",
            on_enter: Some(run_enter),
            accrue: run_accrue,
        },
        // Index 2: Error
        ModeDescriptor {
            mode: Mode::Error,
            name: "Error",
            on_enter: None,
            accrue: error_accrue,
        },
    ]
}

// ── Calibration ──────────────────────────────────────────────

fn calibration_enter(state: &mut EngineState) {
    state.full_time = 0;
    state.current_time = 0;
    state.power_level = PowerLevel::Off;
}

fn calibration_accrue(state: &mut EngineState, delta: i64) -> Option<Mode> {
    state.full_time = state.full_time.saturating_add(delta);
    debug!("CALIBRATION: +{}s, full_time={}", delta, state.full_time);
    None
}

// ── Run ──────────────────────────────────────────────────────

fn run_enter(state: &mut EngineState) {
    state.current_time = state.full_time;
}

fn run_accrue(state: &mut EngineState, delta: i64) -> Option<Mode> {
    state.current_time = state.current_time.saturating_sub(delta);
    debug!("RUN: -{}s, current_time={}", delta, state.current_time);
    None
}

// ── Error ────────────────────────────────────────────────────

fn error_accrue(_state: &mut EngineState, delta: i64) -> Option<Mode> {
    warn!("ERROR: accrual of {}s attempted with no valid mode", delta);
    Some(Mode::Error)
}
