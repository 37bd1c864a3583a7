//! Inbound commands to the engine.
//!
//! These represent gestures forwarded by the UI shell.  The
//! [`FuelAccountingEngine`](super::service::FuelAccountingEngine)
//! interprets them in [`handle_command`](super::service::FuelAccountingEngine::handle_command).

use crate::power::PowerLevel;

/// Commands that the UI shell can send into the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCommand {
    /// One of the four power buttons was pressed.
    SetPower(PowerLevel),

    /// The mode slider was released past its threshold and the user
    /// answered the confirmation dialog.
    RequestModeSwitch { confirmed: bool },

    /// Start a new calibration unconditionally.
    ResetCalibration,
}

impl EngineCommand {
    /// Map a power button index (0–3) to a command.
    pub fn power_button(index: usize) -> Self {
        Self::SetPower(PowerLevel::from_index(index))
    }
}
