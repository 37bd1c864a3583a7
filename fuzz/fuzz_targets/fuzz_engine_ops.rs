//! Fuzz target: `FuelAccountingEngine` command stream
//!
//! The first bytes seed the stored snapshot; the rest are decoded as
//! commands interleaved with clock steps.  The engine must never panic,
//! never rest in Error mode, and calibration capacity must never shrink
//! once the clock is past the last recorded transition.
//!
//! cargo fuzz run fuzz_engine_ops

#![no_main]

use heaterfuel::adapters::MemorySnapshotStore;
use heaterfuel::app::commands::EngineCommand;
use heaterfuel::app::ports::Clock;
use heaterfuel::{EngineConfig, FuelAccountingEngine, Mode, PowerLevel};
use libfuzzer_sys::fuzz_target;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone)]
struct FuzzClock(Rc<Cell<i64>>);

impl Clock for FuzzClock {
    fn now_millis(&self) -> i64 {
        self.0.get()
    }
}

fuzz_target!(|data: &[u8]| {
    let split = data.first().map_or(0, |&n| usize::from(n) % 64);
    let body = data.get(1..).unwrap_or_default();
    let (seed, ops) = body.split_at(split.min(body.len()));

    let clock = FuzzClock(Rc::new(Cell::new(1_767_225_600_000)));
    let store = match std::str::from_utf8(seed) {
        Ok(text) if !text.is_empty() => MemorySnapshotStore::with_snapshot(text),
        _ => MemorySnapshotStore::new(),
    };
    let mut engine = FuelAccountingEngine::new(EngineConfig::default(), store, clock.clone());
    engine.initialize(&mut ());

    for pair in ops.chunks(2) {
        let op = pair[0];
        let step = i64::from(pair.get(1).copied().unwrap_or(0));
        clock.0.set(clock.0.get() + step * 997);

        let before = engine.state();
        let cmd = match op % 6 {
            0..=3 => EngineCommand::SetPower(PowerLevel::from_index(usize::from(op % 4))),
            4 => EngineCommand::RequestModeSwitch { confirmed: op & 0x80 != 0 },
            _ => EngineCommand::ResetCalibration,
        };
        let after = engine.handle_command(cmd, &mut ());

        assert_ne!(after.mode, Mode::Error, "engine rested in Error mode");
        let forward = before.last_transition.saturating_mul(1000) <= clock.0.get();
        if matches!(cmd, EngineCommand::SetPower(_)) && before.mode == Mode::Calibration && forward {
            assert!(after.full_time >= before.full_time, "calibration capacity shrank");
        }
        assert!(engine.fuel_fraction().is_finite());
    }
});
