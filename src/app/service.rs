//! Fuel accounting engine, the hexagonal core.
//!
//! [`FuelAccountingEngine`] owns the mode table, the state record and the
//! configuration.  It exposes a clean, UI-agnostic API.  Storage and time
//! flow through port traits, making the whole engine testable with mock
//! adapters.
//!
//! ```text
//!  SnapshotStore ◀─▶ ┌──────────────────────────┐ ──▶ EventSink
//!                    │  FuelAccountingEngine     │
//!          Clock ──▶ │  ModeMachine · Snapshot   │ ──▶ DisplayModel
//!                    └──────────────────────────┘
//! ```
//!
//! Every mutating operation rewrites the complete snapshot.  A failed
//! write is reported but does not roll back memory; the next mutation
//! writes the whole record again.

use log::{debug, info, warn};

use crate::config::EngineConfig;
use crate::display::{self, DisplayModel};
use crate::fsm::context::EngineState;
use crate::fsm::{Mode, ModeMachine};
use crate::power::PowerLevel;
use crate::snapshot;

use super::commands::EngineCommand;
use super::events::EngineEvent;
use super::ports::{Clock, EventSink, SnapshotStore};

// ───────────────────────────────────────────────────────────────
// FuelAccountingEngine
// ───────────────────────────────────────────────────────────────

/// Tracks the fuel left in one gas cylinder.
pub struct FuelAccountingEngine<S, C> {
    machine: ModeMachine,
    state: EngineState,
    config: EngineConfig,
    store: S,
    clock: C,
}

impl<S: SnapshotStore, C: Clock> FuelAccountingEngine<S, C> {
    /// Construct the engine.
    ///
    /// Does **not** read the store; call [`initialize`](Self::initialize)
    /// next.  Until then the state is an unsaved fresh calibration.
    pub fn new(config: EngineConfig, store: S, clock: C) -> Self {
        let state = EngineState::calibration(clock.now_secs());
        Self {
            machine: ModeMachine::default(),
            state,
            config,
            store,
            clock,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Restore the persisted snapshot, or start a fresh calibration.
    ///
    /// A missing or malformed snapshot is replaced silently.  An unknown
    /// mode tag takes the visible error path instead.
    pub fn initialize(&mut self, sink: &mut impl EventSink) -> EngineState {
        let text = match self.store.load() {
            Ok(Some(text)) => text,
            Ok(None) => {
                info!("No snapshot stored, starting calibration");
                return self.reset_to_calibration(sink);
            }
            Err(e) => {
                warn!("Snapshot load failed ({}), starting calibration", e);
                return self.reset_to_calibration(sink);
            }
        };

        match snapshot::decode(&text) {
            Ok(state) => {
                self.state = state;
                info!(
                    "Engine restored in {} mode: full={}s current={}s power={:?}",
                    self.machine.name(state.mode),
                    state.full_time,
                    state.current_time,
                    state.power_level
                );
                sink.emit(&EngineEvent::Started(state.mode));
                self.state
            }
            Err(e) if e.is_fatal() => {
                warn!("Snapshot has invalid mode: {}", e);
                self.enter_error_state(sink)
            }
            Err(e) => {
                warn!("Discarding malformed snapshot: {}", e);
                sink.emit(&EngineEvent::SnapshotDiscarded(e));
                self.reset_to_calibration(sink)
            }
        }
    }

    // ── Accounting ────────────────────────────────────────────

    /// Account the time spent at the current level, then switch to `level`.
    ///
    /// The delta uses the **old** level: elapsed whole seconds since the
    /// last change, multiplied by the level that was burning.
    pub fn set_power_level(
        &mut self,
        level: PowerLevel,
        sink: &mut impl EventSink,
    ) -> EngineState {
        let now_ms = self.clock.now_millis();
        let from = self.state.power_level;
        let mut delta = 0;

        if !from.is_off() {
            let elapsed = self.state.elapsed_secs(now_ms);
            if elapsed < 0 {
                warn!("Clock moved backwards by {}s", -elapsed);
            }
            delta = self.state.pending_delta(now_ms);
            if let Some(Mode::Error) = self.machine.accrue(&mut self.state, delta) {
                self.enter_error_state(sink);
                delta = 0;
            }
        }

        self.state.power_level = level;
        self.state.last_transition = now_ms.div_euclid(1000);
        self.persist(sink);

        debug!("Power {:?} -> {:?} (delta={})", from, level, delta);
        sink.emit(&EngineEvent::PowerChanged {
            from,
            to: level,
            delta,
        });
        self.state
    }

    // ── Mode switching ────────────────────────────────────────

    /// Act on the answer to the mode-switch confirmation dialog.
    ///
    /// Calibration → Run flushes pending time and fills the tank from the
    /// calibrated capacity.  Run → Calibration discards everything.
    pub fn request_mode_switch(
        &mut self,
        confirmed: bool,
        sink: &mut impl EventSink,
    ) -> EngineState {
        let from = self.state.mode;
        if !confirmed {
            info!("Mode switch from {} declined", self.machine.name(from));
            sink.emit(&EngineEvent::ModeSwitchDeclined(from));
            return self.state;
        }

        match from {
            Mode::Calibration => {
                self.set_power_level(PowerLevel::Off, sink);
                if self.state.mode != Mode::Calibration {
                    // Accrual hit the error path; the reset already happened.
                    return self.state;
                }
                self.machine.enter(&mut self.state, Mode::Run);
                self.persist(sink);
                sink.emit(&EngineEvent::ModeChanged {
                    from,
                    to: Mode::Run,
                });
            }
            Mode::Run => {
                self.reset_to_calibration(sink);
                sink.emit(&EngineEvent::ModeChanged {
                    from,
                    to: Mode::Calibration,
                });
            }
            Mode::Error => {
                self.enter_error_state(sink);
            }
        }
        self.state
    }

    /// Zero both counters and begin a new calibration.
    pub fn reset_to_calibration(&mut self, sink: &mut impl EventSink) -> EngineState {
        self.machine.enter(&mut self.state, Mode::Calibration);
        self.state.last_transition = self.clock.now_secs();
        self.persist(sink);
        info!("Calibration reset");
        sink.emit(&EngineEvent::CalibrationReset);
        self.state
    }

    /// Throw away all progress and start over.
    ///
    /// Emits [`EngineEvent::FatalReset`] so the UI can show its notice,
    /// deletes the snapshot and re-initializes, which lands in a fresh
    /// calibration.
    pub fn enter_error_state(&mut self, sink: &mut impl EventSink) -> EngineState {
        warn!("Fatal engine error: discarding all saved progress");
        self.state.mode = Mode::Error;
        sink.emit(&EngineEvent::FatalReset);

        match self.store.delete() {
            Ok(()) => self.initialize(sink),
            Err(e) => {
                // Re-loading would find the same snapshot; overwrite it instead.
                warn!("Snapshot delete failed ({}), overwriting", e);
                self.reset_to_calibration(sink)
            }
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Process a UI gesture.
    pub fn handle_command(
        &mut self,
        cmd: EngineCommand,
        sink: &mut impl EventSink,
    ) -> EngineState {
        match cmd {
            EngineCommand::SetPower(level) => self.set_power_level(level, sink),
            EngineCommand::RequestModeSwitch { confirmed } => {
                self.request_mode_switch(confirmed, sink)
            }
            EngineCommand::ResetCalibration => self.reset_to_calibration(sink),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Remaining fuel as a fraction of a full cylinder.
    ///
    /// Defined only in Run mode with a non-zero capacity; otherwise the
    /// configured `empty_fraction`.  Not clamped: overdrawn cylinders go
    /// negative.
    pub fn fuel_fraction(&self) -> f64 {
        if self.state.mode != Mode::Run || self.state.full_time <= 0 {
            return self.config.empty_fraction;
        }
        self.state.current_time as f64 / self.state.full_time as f64
    }

    /// Presentation instructions for the current state.
    pub fn display(&self) -> DisplayModel {
        display::render(&self.state, &self.config)
    }

    /// Current state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Current accounting mode.
    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The snapshot store (for inspection by hosts and tests).
    pub fn store(&self) -> &S {
        &self.store
    }

    // ── Internal ──────────────────────────────────────────────

    fn persist(&mut self, sink: &mut impl EventSink) {
        let text = match snapshot::encode(&self.state) {
            Ok(text) => text,
            Err(e) => {
                warn!("Snapshot not written: {}", e);
                return;
            }
        };
        match self.store.save(&text) {
            Ok(()) => debug!("Snapshot saved ({} bytes)", text.len()),
            Err(e) => {
                warn!("Snapshot save failed: {}", e);
                sink.emit(&EngineEvent::PersistFailed(e));
            }
        }
    }
}
