//! Board wiring and fixed hardware parameters (ESP32-S3).

use crate::waveform::INITIAL_INTERVAL_US;

/// Fixed board parameters.
///
/// Pins are not listed here: `main` takes them as typed peripherals
/// (trigger on GPIO42, console UART0 on TX 43 / RX 44).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    /// Console UART baud rate.
    pub baud_rate: u32,
    /// APB clock divider. Intervals are armed in ticks, so the tick must be 1µs.
    pub timer_divider: u32,
    /// First alarm after boot.
    pub initial_interval_us: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            baud_rate: 115200,
            timer_divider: 80, // 80 MHz APB / 80
            initial_interval_us: INITIAL_INTERVAL_US,
        }
    }
}
