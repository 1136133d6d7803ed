//! Module: config
//!
//! Purpose: Runtime configuration shared between the console and the signal
//! timer ISR.
//!
//! Architecture:
//! - Console (command context) is the only writer
//! - Signal timer (ISR context) re-reads every field on every firing
//! - No persistence: defaults are restored on every boot
//!
//! Safety: RT-safe. All access via atomics, no locks.
//!
//! Each field is stored independently. A firing that lands between two
//! console writes (e.g. a wheel change followed by an RPM change) sees at most
//! one step computed from a mixed configuration; the next firing reads both
//! fresh values. That window is accepted instead of a lock that could stall
//! the ISR.

pub mod board;

pub use board::BoardConfig;

use core::num::NonZeroU32;
use core::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};

use crate::wheel::{ToothWheel, WheelCatalog};

/// RPM at boot.
pub const DEFAULT_RPM: u32 = 1000;

/// Wheel index at boot.
pub const DEFAULT_WHEEL: usize = 0;

/// Lowest accepted RPM.
pub const MIN_RPM: u32 = 1;

/// Highest accepted RPM (60-2 at this speed still gets 16µs half periods).
pub const MAX_RPM: u32 = 30_000;

/// Process-wide runtime configuration.
pub static CONFIG: RuntimeConfig = RuntimeConfig::new();

/// Configuration update error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// RPM outside `MIN_RPM..=MAX_RPM`.
    RpmOutOfRange(u32),
    /// Wheel index not in the catalog.
    InvalidWheel(usize),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::RpmOutOfRange(rpm) => {
                write!(f, "rpm {} outside {}..={}", rpm, MIN_RPM, MAX_RPM)
            }
            Self::InvalidWheel(index) => write!(f, "wheel {} not in catalog", index),
        }
    }
}

/// Lock-free runtime configuration.
pub struct RuntimeConfig {
    enabled: AtomicBool,
    /// Only ever written from a `NonZeroU32`.
    rpm: AtomicU32,
    wheel_index: AtomicUsize,
    /// Bumped on every accepted change. The signal timer compares it against
    /// the last value it saw to notice reconfiguration.
    generation: AtomicU32,
}

impl RuntimeConfig {
    /// Boot defaults: disabled, 1000 RPM, wheel 0.
    pub const fn new() -> Self {
        Self {
            enabled: AtomicBool::new(false),
            rpm: AtomicU32::new(DEFAULT_RPM),
            wheel_index: AtomicUsize::new(DEFAULT_WHEEL),
            generation: AtomicU32::new(0),
        }
    }

    /// Set RPM, rejecting zero and over-range values.
    ///
    /// This is the only guard in front of the tooth period division.
    pub fn set_rpm(&self, rpm: u32) -> Result<NonZeroU32, ConfigError> {
        if !(MIN_RPM..=MAX_RPM).contains(&rpm) {
            return Err(ConfigError::RpmOutOfRange(rpm));
        }
        let rpm = NonZeroU32::new(rpm).ok_or(ConfigError::RpmOutOfRange(rpm))?;

        self.rpm.store(rpm.get(), Ordering::Release);
        self.bump();
        Ok(rpm)
    }

    /// Select a wheel from `catalog`. Out-of-range leaves the selection as-is.
    pub fn select_wheel(
        &self,
        index: usize,
        catalog: &WheelCatalog,
    ) -> Result<&'static ToothWheel, ConfigError> {
        let wheel = catalog
            .get(index)
            .map_err(|_| ConfigError::InvalidWheel(index))?;

        self.wheel_index.store(index, Ordering::Release);
        self.bump();
        Ok(wheel)
    }

    /// Enable the output signal.
    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Release);
        self.bump();
    }

    /// Disable the output signal. The timer keeps firing and holds the line low.
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Release);
        self.bump();
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Current RPM. Never zero: `set_rpm` is the only writer.
    #[inline]
    pub fn rpm(&self) -> NonZeroU32 {
        NonZeroU32::new(self.rpm.load(Ordering::Acquire)).unwrap_or(NonZeroU32::MIN)
    }

    #[inline]
    pub fn wheel_index(&self) -> usize {
        self.wheel_index.load(Ordering::Acquire)
    }

    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation.load(Ordering::Acquire)
    }

    /// Read every field once.
    ///
    /// Fields are loaded one after another, not as a transaction.
    #[inline]
    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            enabled: self.is_enabled(),
            rpm: self.rpm(),
            wheel_index: self.wheel_index(),
            generation: self.generation(),
        }
    }

    fn bump(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of the runtime configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfigSnapshot {
    pub enabled: bool,
    pub rpm: NonZeroU32,
    pub wheel_index: usize,
    pub generation: u32,
}
