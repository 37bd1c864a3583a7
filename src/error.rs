//! Unified error types for the fuel accounting core.
//!
//! A single `Error` enum that every subsystem converts into, so callers
//! wiring adapters together handle one type.  All variants are `Copy`;
//! they carry static field names rather than owned strings.

use core::fmt;

use crate::app::ports::StorageError;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation outside the engine's self-healing paths
/// funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The persisted snapshot could not be encoded or decoded.
    Snapshot(SnapshotError),
    /// The snapshot store failed.
    Storage(StorageError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Snapshot(e) => write!(f, "snapshot: {e}"),
            Self::Storage(e) => write!(f, "storage: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

// ---------------------------------------------------------------------------
// Snapshot errors
// ---------------------------------------------------------------------------

/// Why a snapshot could not be decoded (or, for `UnpersistableMode`
/// and `Overflow`, encoded).
///
/// Everything except [`SnapshotError::InvalidMode`] is a malformed
/// snapshot and is recovered silently.  An unknown mode tag goes through
/// the visible error path instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotError {
    /// A required line is absent or blank.
    MissingField(&'static str),
    /// A numeric line did not parse as an integer.
    InvalidNumber(&'static str),
    /// The power line parsed but is outside 0–3.
    InvalidPowerLevel(i64),
    /// The mode line starts with something other than `C` or `R`.
    InvalidMode(char),
    /// `Mode::Error` has no on-disk representation.
    UnpersistableMode,
    /// Encoded text exceeded the fixed snapshot buffer.
    Overflow,
}

impl SnapshotError {
    /// `true` for errors that warrant the user-visible fatal notice.
    pub fn is_fatal(self) -> bool {
        matches!(self, Self::InvalidMode(_))
    }
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(name) => write!(f, "missing field `{name}`"),
            Self::InvalidNumber(name) => write!(f, "field `{name}` is not an integer"),
            Self::InvalidPowerLevel(v) => write!(f, "power level {v} out of range"),
            Self::InvalidMode(c) => write!(f, "unknown mode tag {c:?}"),
            Self::UnpersistableMode => write!(f, "error mode cannot be persisted"),
            Self::Overflow => write!(f, "snapshot exceeds buffer"),
        }
    }
}

impl From<SnapshotError> for Error {
    fn from(e: SnapshotError) -> Self {
        Self::Snapshot(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
