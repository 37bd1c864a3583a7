//! System wall-clock adapter.
//!
//! Implements [`Clock`] with `std::time::SystemTime`.  Times before the
//! UNIX epoch come back negative rather than failing.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::app::ports::Clock;

/// Wall clock of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(d) => i64::try_from(d.as_millis()).unwrap_or(i64::MAX),
            Err(e) => -i64::try_from(e.duration().as_millis()).unwrap_or(i64::MAX),
        }
    }
}
