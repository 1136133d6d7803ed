//! Self-rescheduling signal timer.
//!
//! One call to [`SignalTimer::fire`] is one timer interrupt:
//!
//! 1. Read the runtime config (fresh, every firing) and log when its
//!    generation moved since the last firing
//! 2. Disabled: hold the line low, keep the phase, re-arm the previous delay
//! 3. Enabled: run one waveform step, drive the level, re-arm the new delay
//!
//! The timer is never stopped. Disabling only changes what a firing does, so
//! re-enabling resumes from the exact phase that was left.
//!
//! # Timing
//!
//! Runs in ISR context: O(1), no blocking, no allocation, logging only via
//! the RT log macros.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::config::RuntimeConfig;
use crate::fault::{FaultCode, FaultState};
use crate::hal::{AlarmTimer, TriggerOutput};
use crate::logging::LogStream;
use crate::waveform::{self, WaveformPhase};
use crate::wheel::WheelCatalog;
use crate::{rt_debug, rt_info, rt_warn};

/// Process-wide firing counters.
pub static SIGNAL_STATS: SignalStats = SignalStats::new();

/// Firing counters. Written by the timer only, read by the console.
pub struct SignalStats {
    firings: AtomicU32,
    pulses: AtomicU32,
    gaps: AtomicU32,
    revolutions: AtomicU32,
    idle: AtomicU32,
}

impl SignalStats {
    pub const fn new() -> Self {
        Self {
            firings: AtomicU32::new(0),
            pulses: AtomicU32::new(0),
            gaps: AtomicU32::new(0),
            revolutions: AtomicU32::new(0),
            idle: AtomicU32::new(0),
        }
    }

    #[inline]
    fn record(&self, counter: &AtomicU32) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            firings: self.firings.load(Ordering::Relaxed),
            pulses: self.pulses.load(Ordering::Relaxed),
            gaps: self.gaps.load(Ordering::Relaxed),
            revolutions: self.revolutions.load(Ordering::Relaxed),
            idle: self.idle.load(Ordering::Relaxed),
        }
    }
}

impl Default for SignalStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of firing counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Every firing, enabled or not.
    pub firings: u32,
    /// Rising edges.
    pub pulses: u32,
    /// Missing-tooth steps.
    pub gaps: u32,
    /// Tooth index wraps.
    pub revolutions: u32,
    /// Firings spent on the disabled path.
    pub idle: u32,
}

/// What a single firing did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Firing {
    /// Output disabled: line held low, phase untouched.
    Idle,
    /// One waveform step was rendered.
    Step(waveform::Step),
    /// Config unusable: line held low, phase untouched, fault recorded.
    Fault(FaultCode),
}

/// Timer-side state: the phase plus handles to the shared state it reads.
pub struct SignalTimer<'a> {
    config: &'a RuntimeConfig,
    catalog: &'a WheelCatalog,
    stats: &'a SignalStats,
    fault: &'a FaultState,
    log: &'a LogStream,
    phase: WaveformPhase,
    was_enabled: bool,
    generation: u32,
}

impl<'a> SignalTimer<'a> {
    pub fn new(
        config: &'a RuntimeConfig,
        catalog: &'a WheelCatalog,
        stats: &'a SignalStats,
        fault: &'a FaultState,
        log: &'a LogStream,
    ) -> Self {
        Self {
            config,
            catalog,
            stats,
            fault,
            log,
            phase: WaveformPhase::new(),
            was_enabled: false,
            generation: config.generation(),
        }
    }

    /// Current phase (for tests and diagnostics).
    pub fn phase(&self) -> WaveformPhase {
        self.phase
    }

    /// Handle one timer interrupt and re-arm.
    #[inline]
    pub fn fire<O, A>(&mut self, now_us: i64, out: &mut O, alarm: &mut A) -> Firing
    where
        O: TriggerOutput,
        A: AlarmTimer,
    {
        let firing = self.step(now_us, out);
        alarm.arm(self.phase.interval_us);
        firing
    }

    fn step<O: TriggerOutput>(&mut self, now_us: i64, out: &mut O) -> Firing {
        self.stats.record(&self.stats.firings);

        let snap = self.config.snapshot();
        if snap.generation != self.generation {
            self.generation = snap.generation;
            rt_debug!(
                self.log,
                now_us,
                "config {}: wheel {} rpm {}",
                snap.generation,
                snap.wheel_index,
                snap.rpm
            );
        }

        let enabled = snap.enabled;
        if enabled != self.was_enabled {
            self.was_enabled = enabled;
            rt_info!(
                self.log,
                now_us,
                "output {} at tooth {}",
                if enabled { "enabled" } else { "disabled" },
                self.phase.tooth
            );
        }

        if !enabled {
            out.set_low();
            self.stats.record(&self.stats.idle);
            return Firing::Idle;
        }

        let index = snap.wheel_index;
        let wheel = match self.catalog.get(index) {
            Ok(wheel) => wheel,
            Err(_) => return self.skip(now_us, out, FaultCode::WheelIndex, index as u32),
        };

        if self.fault.is_active() {
            self.fault.clear();
        }

        let step = waveform::step(wheel, snap.rpm, &mut self.phase);
        out.drive(step.level);

        if step.level {
            self.stats.record(&self.stats.pulses);
        }
        if !step.present {
            self.stats.record(&self.stats.gaps);
        }
        if step.revolution {
            self.stats.record(&self.stats.revolutions);
        }

        Firing::Step(step)
    }

    fn skip<O: TriggerOutput>(
        &mut self,
        now_us: i64,
        out: &mut O,
        code: FaultCode,
        data: u32,
    ) -> Firing {
        out.set_low();
        if self.fault.set(code, data) {
            rt_warn!(self.log, now_us, "firing skipped: {} ({})", code.as_str(), data);
        }
        Firing::Fault(code)
    }
}
