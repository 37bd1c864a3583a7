//! Heater power levels.
//!
//! The four front-panel settings.  The numeric value doubles as the burn
//! rate multiplier: one second at `High` consumes three seconds of fuel
//! budget.

use serde::Serialize;

/// Burn-rate setting selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[repr(u8)]
pub enum PowerLevel {
    /// Heater off, no time accrues.
    #[default]
    Off = 0,
    Low = 1,
    Medium = 2,
    High = 3,
}

impl PowerLevel {
    /// Total number of levels (one button each).
    pub const COUNT: usize = 4;

    /// All levels in button order.
    pub const ALL: [Self; Self::COUNT] = [Self::Off, Self::Low, Self::Medium, Self::High];

    /// Parse a persisted level.  `None` for anything outside 0–3.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Off),
            1 => Some(Self::Low),
            2 => Some(Self::Medium),
            3 => Some(Self::High),
            _ => None,
        }
    }

    /// Convert a UI button index.  Out-of-range indices are a caller bug:
    /// asserts in debug builds, falls back to `Off` in release.
    pub fn from_index(idx: usize) -> Self {
        match u8::try_from(idx).ok().and_then(Self::from_u8) {
            Some(level) => level,
            None => {
                debug_assert!(false, "invalid power index: {idx}");
                Self::Off
            }
        }
    }

    /// Seconds of fuel budget consumed per wall-clock second.
    pub const fn multiplier(self) -> i64 {
        self as i64
    }

    /// Button index (0–3).
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn is_off(self) -> bool {
        matches!(self, Self::Off)
    }
}
