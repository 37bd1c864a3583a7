//! Integration tests: FuelAccountingEngine → mode table → snapshot store.

use super::mock_ports::{FailingStore, ManualClock, RecordingSink, T0_MILLIS, make_engine};
use heaterfuel::app::commands::EngineCommand;
use heaterfuel::app::events::EngineEvent;
use heaterfuel::error::SnapshotError;
use heaterfuel::{EngineConfig, FuelAccountingEngine, Mode, PowerLevel};

const T0_SECS: i64 = T0_MILLIS / 1000;

fn run_seed(full: i64, current: i64) -> String {
    format!("{full}\n{current}\nR\n0\n{T0_SECS}")
}

// ── Fresh start ───────────────────────────────────────────────

#[test]
fn first_run_starts_calibration_and_persists() {
    let (engine, _clock, sink) = make_engine(None);
    let s = engine.state();
    assert_eq!(s.mode, Mode::Calibration);
    assert_eq!((s.full_time, s.current_time), (0, 0));
    assert_eq!(s.power_level, PowerLevel::Off);
    assert_eq!(s.last_transition, T0_SECS);
    assert_eq!(
        engine.store().snapshot(),
        Some(format!("0\n0\nC\n0\n{T0_SECS}").as_str())
    );
    assert!(sink.events.contains(&EngineEvent::CalibrationReset));
    assert!(!sink.saw_fatal());
}

// ── Scenario A: calibration accrual ───────────────────────────

#[test]
fn calibration_ten_seconds_at_medium_adds_twenty() {
    let (mut engine, clock, mut sink) = make_engine(None);
    engine.set_power_level(PowerLevel::Medium, &mut sink);
    clock.advance_secs(10);
    let s = engine.set_power_level(PowerLevel::Off, &mut sink);
    assert_eq!(s.full_time, 20);
    assert_eq!(s.current_time, 0);
    assert_eq!(
        sink.events.last(),
        Some(&EngineEvent::PowerChanged {
            from: PowerLevel::Medium,
            to: PowerLevel::Off,
            delta: 20
        })
    );
}

#[test]
fn delta_uses_the_old_level() {
    let (mut engine, clock, mut sink) = make_engine(None);
    engine.set_power_level(PowerLevel::Low, &mut sink);
    clock.advance_secs(10);
    engine.set_power_level(PowerLevel::High, &mut sink);
    assert_eq!(engine.state().full_time, 10);
    clock.advance_secs(10);
    engine.set_power_level(PowerLevel::Off, &mut sink);
    assert_eq!(engine.state().full_time, 40);
}

// ── Scenario B: run depletion ─────────────────────────────────

#[test]
fn run_thirty_seconds_at_low_leaves_seventy() {
    let (mut engine, clock, mut sink) = make_engine(Some(run_seed(100, 100).as_str()));
    assert_eq!(engine.mode(), Mode::Run);
    engine.set_power_level(PowerLevel::Low, &mut sink);
    clock.advance_secs(30);
    let s = engine.set_power_level(PowerLevel::Off, &mut sink);
    assert_eq!(s.current_time, 70);
    assert_eq!(s.full_time, 100);
    assert!((engine.fuel_fraction() - 0.7).abs() < 1e-9);
}

#[test]
fn overdrawn_cylinder_goes_negative() {
    let (mut engine, clock, mut sink) = make_engine(Some(run_seed(10, 10).as_str()));
    engine.set_power_level(PowerLevel::Low, &mut sink);
    clock.advance_secs(30);
    engine.set_power_level(PowerLevel::Off, &mut sink);
    assert_eq!(engine.state().current_time, -20);
    assert!((engine.fuel_fraction() + 2.0).abs() < 1e-9);
    let gauge = engine.display().gauge.expect("gauge visible in Run");
    assert!(gauge.fraction.abs() < f64::EPSILON, "display clamps");
}

// ── Off means off ─────────────────────────────────────────────

#[test]
fn off_to_off_accrues_nothing() {
    let (mut engine, clock, mut sink) = make_engine(None);
    engine.set_power_level(PowerLevel::Off, &mut sink);
    clock.advance_secs(86_400);
    let s = engine.set_power_level(PowerLevel::Off, &mut sink);
    assert_eq!(s.full_time, 0);
    assert_eq!(
        sink.events.last(),
        Some(&EngineEvent::PowerChanged {
            from: PowerLevel::Off,
            to: PowerLevel::Off,
            delta: 0
        })
    );
}

// ── Truncation ────────────────────────────────────────────────

#[test]
fn sub_second_remainders_are_dropped_before_multiplying() {
    let (mut engine, clock, mut sink) = make_engine(None);
    clock.advance_millis(900);
    engine.set_power_level(PowerLevel::High, &mut sink);
    assert_eq!(engine.state().last_transition, T0_SECS);
    // 2.9 s after the stored (floored) timestamp
    clock.advance_millis(2_000);
    engine.set_power_level(PowerLevel::Off, &mut sink);
    assert_eq!(engine.state().full_time, 6);
}

// ── Mode switching ────────────────────────────────────────────

#[test]
fn switch_to_run_flushes_and_fills_tank() {
    let (mut engine, clock, mut sink) = make_engine(None);
    engine.set_power_level(PowerLevel::High, &mut sink);
    clock.advance_secs(100);
    let s = engine.request_mode_switch(true, &mut sink);
    assert_eq!(s.mode, Mode::Run);
    assert_eq!(s.full_time, 300);
    assert_eq!(s.current_time, 300);
    assert_eq!(s.power_level, PowerLevel::Off);
    assert_eq!(
        engine.store().snapshot(),
        Some(format!("300\n300\nR\n0\n{}", T0_SECS + 100).as_str())
    );
    assert!(sink.events.contains(&EngineEvent::ModeChanged {
        from: Mode::Calibration,
        to: Mode::Run
    }));
    assert!((engine.fuel_fraction() - 1.0).abs() < f64::EPSILON);
}

#[test]
fn declined_switch_changes_nothing() {
    let (mut engine, _clock, mut sink) = make_engine(Some(run_seed(500, 250).as_str()));
    let before = engine.state();
    let writes = engine.store().writes();
    let after = engine.request_mode_switch(false, &mut sink);
    assert_eq!(before, after);
    assert_eq!(engine.store().writes(), writes, "no write when declined");
    assert_eq!(
        sink.events.last(),
        Some(&EngineEvent::ModeSwitchDeclined(Mode::Run))
    );
}

// ── Scenario E ────────────────────────────────────────────────

#[test]
fn confirmed_switch_from_run_always_zeroes() {
    for (full, current) in [(500, 300), (100, -50), (0, 0)] {
        let (mut engine, _clock, mut sink) = make_engine(Some(run_seed(full, current).as_str()));
        let s = engine.request_mode_switch(true, &mut sink);
        assert_eq!(s.mode, Mode::Calibration);
        assert_eq!((s.full_time, s.current_time), (0, 0));
        assert_eq!(s.power_level, PowerLevel::Off);
    }
}

#[test]
fn switching_from_run_while_burning_discards_pending_time() {
    let (mut engine, clock, mut sink) = make_engine(Some(run_seed(500, 500).as_str()));
    engine.set_power_level(PowerLevel::High, &mut sink);
    clock.advance_secs(60);
    let s = engine.request_mode_switch(true, &mut sink);
    assert_eq!(s.full_time, 0);
    assert_eq!(s.last_transition, T0_SECS + 60);
}

// ── Scenario C: malformed snapshot ────────────────────────────

#[test]
fn two_line_snapshot_resets_silently() {
    let (engine, _clock, sink) = make_engine(Some("100\n50\n"));
    assert_eq!(engine.mode(), Mode::Calibration);
    assert_eq!(engine.state().full_time, 0);
    assert!(!sink.saw_fatal(), "malformed snapshots are not user-visible");
    assert!(sink.events.contains(&EngineEvent::SnapshotDiscarded(
        SnapshotError::MissingField("mode")
    )));
}

#[test]
fn garbage_numbers_reset_silently() {
    let (engine, _clock, sink) = make_engine(Some("lots\nof\nC\nfuel\nyesterday"));
    assert_eq!(engine.mode(), Mode::Calibration);
    assert!(!sink.saw_fatal());
}

// ── Invalid mode: visible error path ─────────────────────────

#[test]
fn unknown_mode_tag_raises_fatal_reset() {
    let (engine, _clock, sink) = make_engine(Some("900\n400\nE\n2\n0"));
    assert_eq!(engine.mode(), Mode::Calibration);
    assert_eq!(engine.state().full_time, 0);
    assert_eq!(sink.count(|e| *e == EngineEvent::FatalReset), 1);
    assert_eq!(
        engine.store().snapshot(),
        Some(format!("0\n0\nC\n0\n{T0_SECS}").as_str())
    );
}

#[test]
fn enter_error_state_discards_progress() {
    let (mut engine, _clock, mut sink) = make_engine(Some(run_seed(800, 600).as_str()));
    let s = engine.enter_error_state(&mut sink);
    assert_eq!(s.mode, Mode::Calibration);
    assert_eq!(s.full_time, 0);
    assert!(sink.saw_fatal());
}

// ── Scenario D: zero capacity in Run ──────────────────────────

#[test]
fn zero_capacity_run_reports_sentinel() {
    let (engine, _clock, _sink) = make_engine(Some(run_seed(0, 0).as_str()));
    assert_eq!(engine.mode(), Mode::Run);
    let f = engine.fuel_fraction();
    assert!(f.is_finite());
    assert!(f.abs() < f64::EPSILON);
}

#[test]
fn sentinel_follows_config() {
    let clock = ManualClock::new(T0_MILLIS);
    let store = heaterfuel::adapters::MemorySnapshotStore::with_snapshot(run_seed(0, 0));
    let config = EngineConfig {
        empty_fraction: 1.0,
        ..Default::default()
    };
    let mut engine = FuelAccountingEngine::new(config, store, clock);
    engine.initialize(&mut ());
    assert!((engine.fuel_fraction() - 1.0).abs() < f64::EPSILON);
}

// ── Persistence side effects ──────────────────────────────────

#[test]
fn every_mutation_writes_the_snapshot() {
    let (mut engine, clock, mut sink) = make_engine(None);
    let base = engine.store().writes();
    engine.set_power_level(PowerLevel::Low, &mut sink);
    clock.advance_secs(5);
    engine.set_power_level(PowerLevel::Off, &mut sink);
    engine.reset_to_calibration(&mut sink);
    assert_eq!(engine.store().writes(), base + 3);
}

#[test]
fn write_failure_is_reported_but_state_advances() {
    let clock = ManualClock::new(T0_MILLIS);
    let store = FailingStore { text: None };
    let mut engine = FuelAccountingEngine::new(EngineConfig::default(), store, clock.clone());
    let mut sink = RecordingSink::new();
    engine.initialize(&mut sink);
    engine.set_power_level(PowerLevel::Medium, &mut sink);
    clock.advance_secs(4);
    engine.set_power_level(PowerLevel::Off, &mut sink);
    assert_eq!(engine.state().full_time, 8);
    assert!(
        sink.count(|e| matches!(e, EngineEvent::PersistFailed(_))) >= 3,
        "initial reset plus two power changes"
    );
}

#[test]
fn undeletable_bad_snapshot_is_overwritten_without_looping() {
    let clock = ManualClock::new(T0_MILLIS);
    let store = FailingStore {
        text: Some("1\n1\nQ\n0\n0".into()),
    };
    let mut engine = FuelAccountingEngine::new(EngineConfig::default(), store, clock);
    let mut sink = RecordingSink::new();
    let s = engine.initialize(&mut sink);
    assert_eq!(s.mode, Mode::Calibration);
    assert_eq!(sink.count(|e| *e == EngineEvent::FatalReset), 1);
}

// ── Command dispatch ──────────────────────────────────────────

#[test]
fn commands_drive_a_full_cylinder_lifecycle() {
    let (mut engine, clock, mut sink) = make_engine(None);

    engine.handle_command(EngineCommand::power_button(3), &mut sink);
    clock.advance_secs(1_000);
    engine.handle_command(EngineCommand::power_button(0), &mut sink);
    engine.handle_command(EngineCommand::RequestModeSwitch { confirmed: true }, &mut sink);
    assert_eq!(engine.mode(), Mode::Run);
    assert_eq!(engine.state().current_time, 3_000);

    engine.handle_command(EngineCommand::SetPower(PowerLevel::Medium), &mut sink);
    clock.advance_secs(900);
    engine.handle_command(EngineCommand::SetPower(PowerLevel::Off), &mut sink);
    assert_eq!(engine.state().current_time, 1_200);

    let model = engine.display();
    assert_eq!(model.banner.label, "Run Mode");
    assert_eq!(model.buttons, [false, true, true, true]);

    engine.handle_command(EngineCommand::ResetCalibration, &mut sink);
    assert_eq!(engine.mode(), Mode::Calibration);
    assert!(engine.display().gauge.is_none());
}
