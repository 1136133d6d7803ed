//! # TriggerWheelEmulator
//!
//! Reproduces the output of a crank/cam trigger wheel sensor on one GPIO for
//! bench-testing ignition and engine controllers.
//!
//! ## Architecture
//!
//! ```text
//! Console (main loop)      RuntimeConfig        SignalTimer (ISR)
//! ───────────────────      ─────────────        ─────────────────
//! set rpm / set wheel ───▶ atomics ───────────▶ waveform::step ──▶ GPIO
//! enable / disable                               re-arm alarm
//! ```
//!
//! - The console is the only writer of [`RuntimeConfig`]
//! - The timer re-reads the config on every firing and owns the phase
//! - No locks between the two contexts; each field is a single atomic

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod console;
pub mod fault;
pub mod hal;
pub mod log_drain;
pub mod log_globals;
pub mod logging;
pub mod signal;
pub mod waveform;
pub mod wheel;

pub use config::{RuntimeConfig, CONFIG};
pub use fault::{FaultCode, FaultState, FAULT_STATE};
pub use log_globals::{CONSOLE_LOG, TIMER_LOG};
pub use signal::{SignalStats, SignalTimer, SIGNAL_STATS};
pub use waveform::{Step, WaveformPhase};
pub use wheel::{ToothWheel, WheelCatalog, CATALOG};
