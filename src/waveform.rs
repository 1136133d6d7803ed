//! Tooth pattern state machine.
//!
//! Pure logic, no hardware dependencies. Given the active wheel, the RPM and
//! the current phase, one [`step`] produces the next output level and the
//! delay until the next firing. Fully testable on host.
//!
//! # Waveform
//!
//! ```text
//!  tooth:   0       1       2          33      34    35 (gap)   0
//!          ┌───┐   ┌───┐   ┌───┐     ┌───┐   ┌───┐              ┌───┐
//!  out:  ──┘   └───┘   └───┘   └ ... ┘   └───┘   └──────────────┘   └──
//!          |T/2|T/2|                                   T
//! ```
//!
//! A present tooth takes two firings (rising then falling edge), each half a
//! tooth period long. A missing tooth takes one firing held low for a full
//! tooth period.

use core::num::NonZeroU32;

use crate::wheel::ToothWheel;

/// Microseconds per minute, the numerator of every tooth period.
pub const MICROS_PER_MINUTE: u32 = 60_000_000;

/// Delay armed at startup, before the first step has computed one.
pub const INITIAL_INTERVAL_US: u32 = 500;

/// Phase carried across firings.
///
/// Owned by the signal timer. Never reset on RPM or wheel changes: a switch
/// takes effect on the next step with the tooth index and level left as-is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveformPhase {
    /// Tooth about to be rendered, `0..teeth` of the active wheel.
    pub tooth: u16,
    /// Current output level.
    pub level: bool,
    /// Delay armed for the next firing, always > 0.
    pub interval_us: u32,
}

impl WaveformPhase {
    /// Startup phase: tooth 0, output low.
    pub const fn new() -> Self {
        Self {
            tooth: 0,
            level: false,
            interval_us: INITIAL_INTERVAL_US,
        }
    }
}

impl Default for WaveformPhase {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of one firing step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    /// Level to drive on the output.
    pub level: bool,
    /// Delay until the next firing in microseconds.
    pub interval_us: u32,
    /// Whether the tooth just rendered is a present tooth.
    pub present: bool,
    /// Whether this step wrapped the tooth index back to 0.
    pub revolution: bool,
}

/// One full tooth period at `rpm`, in whole microseconds.
///
/// Never returns less than 2, so half a period is still a valid alarm.
#[inline]
pub fn tooth_period_us(wheel: &ToothWheel, rpm: NonZeroU32) -> u32 {
    (MICROS_PER_MINUTE / rpm.get() / wheel.teeth as u32).max(2)
}

/// Advance the waveform by one firing.
///
/// The RPM is non-zero by construction; zero and range checks belong to the
/// configuration boundary, never to this path.
#[inline]
pub fn step(wheel: &ToothWheel, rpm: NonZeroU32, phase: &mut WaveformPhase) -> Step {
    // A wheel switch may leave the index beyond the new tooth count.
    let tooth = phase.tooth % wheel.teeth;
    let present = wheel.is_present(tooth);

    if present {
        phase.level = !phase.level;
    } else {
        phase.level = false;
    }

    // Falling edge completes a present tooth; a gap tooth completes at once.
    let mut next = tooth;
    let mut revolution = false;
    if !phase.level {
        next += 1;
        if next >= wheel.teeth {
            next = 0;
            revolution = true;
        }
    }
    phase.tooth = next;

    let period = tooth_period_us(wheel, rpm);
    phase.interval_us = if present { period / 2 } else { period };

    Step {
        level: phase.level,
        interval_us: phase.interval_us,
        present,
        revolution,
    }
}
