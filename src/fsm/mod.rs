//! Function-pointer mode table.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │  ModeTable                                                │
//! │  ┌─────────────┬──────────────┬─────────────────────────┐ │
//! │  │ Mode        │ on_enter     │ accrue                  │ │
//! │  ├─────────────┼──────────────┼─────────────────────────┤ │
//! │  │ Calibration │ fn(state)    │ fn(state, Δ)->Option<>  │ │
//! │  │ Run         │ fn(state)    │ fn(state, Δ)->Option<>  │ │
//! │  │ Error       │ fn(state)    │ fn(state, Δ)->Option<>  │ │
//! │  └─────────────┴──────────────┴─────────────────────────┘ │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! On every power change the engine hands the weighted delta to the
//! current mode's `accrue` handler.  A handler returns `Some(next)` to
//! request a transition; the only such request today is `Error`, which
//! the engine resolves immediately by resetting to Calibration.

pub mod context;
pub mod states;

use context::EngineState;
use log::info;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Mode identity
// ---------------------------------------------------------------------------

/// Accounting mode.  Must stay in sync with [`states::build_mode_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum Mode {
    /// Measuring the capacity of a fresh cylinder.
    Calibration = 0,
    /// Depleting a calibrated budget.
    Run = 1,
    /// Transient: entered and left within a single operation.
    Error = 2,
}

impl Mode {
    /// Total number of modes; sizes the table array.
    pub const COUNT: usize = 3;

    /// Single-character tag written to the snapshot.  `Error` is never
    /// persisted and has no tag.
    pub const fn snapshot_tag(self) -> Option<char> {
        match self {
            Self::Calibration => Some('C'),
            Self::Run => Some('R'),
            Self::Error => None,
        }
    }

    /// Parse a snapshot tag.
    pub const fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'C' => Some(Self::Calibration),
            'R' => Some(Self::Run),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Runs once when a mode is entered.
pub type ModeActionFn = fn(&mut EngineState);

/// Applies a weighted delta.  Returns `Some(next)` to request a transition.
pub type AccrueFn = fn(&mut EngineState, i64) -> Option<Mode>;

// ---------------------------------------------------------------------------
// Mode descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single mode.
pub struct ModeDescriptor {
    pub mode: Mode,
    pub name: &'static str,
    pub on_enter: Option<ModeActionFn>,
    pub accrue: AccrueFn,
}

// ---------------------------------------------------------------------------
// Mode machine
// ---------------------------------------------------------------------------

/// Dispatches accrual and mode entry through the descriptor table.
pub struct ModeMachine {
    table: [ModeDescriptor; Mode::COUNT],
}

impl ModeMachine {
    pub fn new(table: [ModeDescriptor; Mode::COUNT]) -> Self {
        Self { table }
    }

    /// Apply `delta` in the state's current mode.
    pub fn accrue(&self, state: &mut EngineState, delta: i64) -> Option<Mode> {
        (self.descriptor(state.mode).accrue)(state, delta)
    }

    /// Switch `state` into `next`, running its `on_enter` action.
    pub fn enter(&self, state: &mut EngineState, next: Mode) {
        info!(
            "Mode transition: {} -> {}",
            self.descriptor(state.mode).name,
            self.descriptor(next).name
        );
        state.mode = next;
        if let Some(enter) = self.descriptor(next).on_enter {
            enter(state);
        }
    }

    /// Human-readable mode name.
    pub fn name(&self, mode: Mode) -> &'static str {
        self.descriptor(mode).name
    }

    fn descriptor(&self, mode: Mode) -> &ModeDescriptor {
        &self.table[mode as usize]
    }
}

impl Default for ModeMachine {
    fn default() -> Self {
        Self::new(states::build_mode_table())
    }
}
