//! Signal timer hardware.
//!
//! A one-shot-per-firing alarm: the callback runs once, computes the next
//! delay and re-arms. The period changes on every firing, so this is not a
//! fixed-rate ticker.

/// Re-armable alarm seen from inside the firing callback.
pub trait AlarmTimer {
    /// Schedule the next firing `interval_us` after this one. Called exactly
    /// once per firing, from the firing context.
    fn arm(&mut self, interval_us: u32);
}

#[cfg(target_os = "espidf")]
pub use self::esp::{start_signal_timer, IsrAlarm};

#[cfg(target_os = "espidf")]
mod esp {
    use esp_idf_svc::hal::peripheral::Peripheral;
    use esp_idf_svc::hal::timer::{self, TimerDriver};
    use esp_idf_svc::sys::{self, EspError};

    use super::AlarmTimer;
    use crate::config::BoardConfig;
    use crate::hal::TriggerOutput;
    use crate::signal::SignalTimer;

    /// Alarm register access for a running timer, valid in its ISR.
    pub struct IsrAlarm {
        group: sys::timer_group_t,
        index: sys::timer_idx_t,
    }

    impl AlarmTimer for IsrAlarm {
        #[inline]
        fn arm(&mut self, interval_us: u32) {
            // Auto-reload zeroes the counter at each alarm, so the alarm value
            // is the delay itself (1 tick = 1µs).
            unsafe {
                sys::timer_group_set_alarm_value_in_isr(self.group, self.index, interval_us as u64);
            }
        }
    }

    /// Configure the hardware timer, hand it the signal timer and start firing.
    ///
    /// The returned driver must be kept alive for the process lifetime;
    /// dropping it stops the signal. Any error here is fatal at startup.
    pub fn start_signal_timer<'d, T, P>(
        timer: impl Peripheral<P = T> + 'd,
        board: &BoardConfig,
        mut signal: SignalTimer<'static>,
        mut pin: P,
    ) -> Result<TimerDriver<'d>, EspError>
    where
        T: timer::Timer,
        P: TriggerOutput + Send + 'static,
    {
        let config = timer::config::Config::new()
            .divider(board.timer_divider)
            .auto_reload(true);
        let mut driver = TimerDriver::new(timer, &config)?;

        let mut alarm = IsrAlarm {
            group: T::group(),
            index: T::index(),
        };

        driver.set_counter(0)?;
        driver.set_alarm(board.initial_interval_us as u64)?;

        // SAFETY: The callback runs in ISR context. It owns the pin, the
        // phase and the alarm handle; everything shared is atomic. Nothing in
        // `SignalTimer::fire` blocks or allocates.
        unsafe {
            driver.subscribe(move || {
                let now_us = sys::esp_timer_get_time();
                signal.fire(now_us, &mut pin, &mut alarm);
            })?;
        }

        driver.enable_interrupt()?;
        driver.enable_alarm(true)?;
        driver.enable(true)?;

        Ok(driver)
    }
}
