//! Integration tests: engine ↔ FileSnapshotStore across simulated restarts.

use super::mock_ports::{ManualClock, RecordingSink, T0_MILLIS};
use heaterfuel::adapters::FileSnapshotStore;
use heaterfuel::app::ports::SnapshotStore;
use heaterfuel::{EngineConfig, FuelAccountingEngine, Mode, PowerLevel};
use std::fs;
use std::path::{Path, PathBuf};

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "heaterfuel-it-{}-{}",
        tag,
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn open(
    dir: &Path,
    clock: &ManualClock,
) -> FuelAccountingEngine<FileSnapshotStore, ManualClock> {
    let config = EngineConfig::default();
    let store = FileSnapshotStore::in_dir(dir, &config).expect("scratch dir");
    FuelAccountingEngine::new(config, store, clock.clone())
}

#[test]
fn burning_time_accrues_while_app_is_closed() {
    let dir = scratch_dir("closed");
    let clock = ManualClock::new(T0_MILLIS);
    let mut sink = RecordingSink::new();

    {
        let mut engine = open(&dir, &clock);
        engine.initialize(&mut sink);
        engine.set_power_level(PowerLevel::High, &mut sink);
    }

    clock.advance_secs(60);

    let mut engine = open(&dir, &clock);
    let restored = engine.initialize(&mut sink);
    assert_eq!(restored.power_level, PowerLevel::High);
    assert_eq!(restored.mode, Mode::Calibration);

    engine.set_power_level(PowerLevel::Off, &mut sink);
    assert_eq!(engine.state().full_time, 180);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn run_mode_survives_restart() {
    let dir = scratch_dir("run");
    let clock = ManualClock::new(T0_MILLIS);
    let mut sink = RecordingSink::new();

    let saved = {
        let mut engine = open(&dir, &clock);
        engine.initialize(&mut sink);
        engine.set_power_level(PowerLevel::Low, &mut sink);
        clock.advance_secs(200);
        engine.request_mode_switch(true, &mut sink)
    };

    let mut engine = open(&dir, &clock);
    let restored = engine.initialize(&mut sink);
    assert_eq!(restored, saved);
    assert_eq!(restored.mode, Mode::Run);
    assert_eq!(restored.current_time, 200);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn windows_line_endings_from_older_installs_load() {
    let dir = scratch_dir("crlf");
    let clock = ManualClock::new(T0_MILLIS);
    let config = EngineConfig::default();
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join(&config.status_file_name),
        "3600\r\n1800\r\nR\r\n0\r\n1767225600",
    )
    .unwrap();

    let mut engine = open(&dir, &clock);
    let s = engine.initialize(&mut RecordingSink::new());
    assert_eq!(s.mode, Mode::Run);
    assert!((engine.fuel_fraction() - 0.5).abs() < 1e-9);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn fatal_reset_replaces_the_file() {
    let dir = scratch_dir("fatal");
    let clock = ManualClock::new(T0_MILLIS);
    let config = EngineConfig::default();
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(&config.status_file_name), "10\n10\nZ\n1\n0").unwrap();

    let mut engine = open(&dir, &clock);
    let mut sink = RecordingSink::new();
    engine.initialize(&mut sink);
    assert!(sink.saw_fatal());
    assert_eq!(
        engine.store().load().unwrap().as_deref(),
        Some("0\n0\nC\n0\n1767225600")
    );

    let _ = fs::remove_dir_all(&dir);
}
