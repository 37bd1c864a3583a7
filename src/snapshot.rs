//! Status-file codec.
//!
//! Five newline-separated fields in fixed order, no escaping:
//!
//! ```text
//! <full_time>        signed integer, weighted seconds
//! <current_time>     signed integer, weighted seconds
//! <mode>             'C' | 'R'
//! <power_level>      0-3
//! <last_transition>  UNIX epoch seconds
//! ```
//!
//! The timestamp is an epoch integer rather than a locale-formatted date
//! so that a file written on one device parses on any other.

use core::fmt::Write;

use crate::error::SnapshotError;
use crate::fsm::Mode;
use crate::fsm::context::EngineState;
use crate::power::PowerLevel;

/// Upper bound on encoded length: three i64 fields (20 chars each),
/// one mode char, one digit, four separators.
pub const SNAPSHOT_CAPACITY: usize = 96;

/// Encoded snapshot text.
pub type SnapshotText = heapless::String<SNAPSHOT_CAPACITY>;

const FIELD_NAMES: [&str; 5] = [
    "full_time",
    "current_time",
    "mode",
    "power_level",
    "last_transition",
];

/// Serialise `state`.  Fails for `Mode::Error`, which is never persisted.
pub fn encode(state: &EngineState) -> Result<SnapshotText, SnapshotError> {
    let tag = state
        .mode
        .snapshot_tag()
        .ok_or(SnapshotError::UnpersistableMode)?;
    let mut out = SnapshotText::new();
    write!(
        out,
        "{}\n{}\n{}\n{}\n{}",
        state.full_time,
        state.current_time,
        tag,
        state.power_level as u8,
        state.last_transition
    )
    .map_err(|_| SnapshotError::Overflow)?;
    Ok(out)
}

/// Parse snapshot text.  Lines are trimmed, so `\r\n` files are accepted;
/// anything after the fifth line is ignored.
pub fn decode(text: &str) -> Result<EngineState, SnapshotError> {
    let mut fields = [""; 5];
    let mut lines = text.lines();
    for (slot, name) in fields.iter_mut().zip(FIELD_NAMES) {
        *slot = lines
            .next()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .ok_or(SnapshotError::MissingField(name))?;
    }

    let full_time = parse_int(fields[0], FIELD_NAMES[0])?;
    let current_time = parse_int(fields[1], FIELD_NAMES[1])?;

    // Only the first character of the mode line is significant.
    let tag = fields[2]
        .chars()
        .next()
        .ok_or(SnapshotError::MissingField(FIELD_NAMES[2]))?;
    let mode = Mode::from_tag(tag).ok_or(SnapshotError::InvalidMode(tag))?;

    let raw_level = parse_int(fields[3], FIELD_NAMES[3])?;
    let power_level = u8::try_from(raw_level)
        .ok()
        .and_then(PowerLevel::from_u8)
        .ok_or(SnapshotError::InvalidPowerLevel(raw_level))?;

    let last_transition = parse_int(fields[4], FIELD_NAMES[4])?;

    Ok(EngineState {
        full_time,
        current_time,
        mode,
        power_level,
        last_transition,
    })
}

fn parse_int(field: &str, name: &'static str) -> Result<i64, SnapshotError> {
    field
        .parse::<i64>()
        .map_err(|_| SnapshotError::InvalidNumber(name))
}
