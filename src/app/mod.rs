//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the accounting rules: power-weighted time
//! accrual, mode switching, and the self-healing reset paths.  All
//! interaction with storage and time happens through **port traits**
//! defined in [`ports`], keeping this layer testable without a
//! filesystem or a real clock.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
