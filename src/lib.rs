//! HeaterFuel core library.
//!
//! Tracks the fuel left in a gas-heater cylinder by accumulating on-time
//! weighted by the selected power level.  A calibration pass measures a
//! full cylinder; run mode then counts the budget down.  State survives
//! restarts through a five-line status file.
//!
//! The UI shell is an external collaborator: it forwards button and
//! slider gestures as [`app::commands::EngineCommand`]s and draws
//! [`display::DisplayModel`]s.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod display;
pub mod error;
pub mod fsm;
pub mod power;
pub mod snapshot;

pub use app::service::FuelAccountingEngine;
pub use config::EngineConfig;
pub use error::{Error, Result};
pub use fsm::Mode;
pub use fsm::context::EngineState;
pub use power::PowerLevel;
