//! TriggerWheelEmulator - Main entry point
//!
//! On the ESP32-S3:
//! 1. Drive GPIO42 low
//! 2. Start the signal timer (timer group 0, 1 MHz, self re-arming ISR)
//! 3. Poll the UART0 console and drain the log streams, forever
//!
//! On any other target the same console runs over stdin/stdout against a
//! software timer thread, for bench testing without hardware.

use trigger_wheel_emulator::{
    console::{Console, ConsoleContext},
    log_drain, SignalTimer, CATALOG, CONFIG, FAULT_STATE, SIGNAL_STATS, TIMER_LOG,
};

#[cfg(target_os = "espidf")]
fn main() -> Result<(), esp_idf_svc::sys::EspError> {
    use esp_idf_svc::hal::delay::{FreeRtos, NON_BLOCK};
    use esp_idf_svc::hal::gpio::AnyIOPin;
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::hal::uart::{self, UartDriver};
    use esp_idf_svc::hal::units::Hertz;
    use trigger_wheel_emulator::config::BoardConfig;
    use trigger_wheel_emulator::hal::{gpio::init_trigger_pin, timer::start_signal_timer};

    esp_idf_svc::sys::link_patches();

    let peripherals = Peripherals::take()?;
    let board = BoardConfig::default();

    // Trigger output on GPIO42, console on UART0 (TX 43, RX 44)
    let pin = init_trigger_pin(peripherals.pins.gpio42)?;
    let signal = SignalTimer::new(&CONFIG, &CATALOG, &SIGNAL_STATS, &FAULT_STATE, &TIMER_LOG);
    let _timer = start_signal_timer(peripherals.timer00, &board, signal, pin)?;

    let uart_config = uart::config::Config::default().baudrate(Hertz(board.baud_rate));
    let uart = UartDriver::new(
        peripherals.uart0,
        peripherals.pins.gpio43,
        peripherals.pins.gpio44,
        Option::<AnyIOPin>::None, // CTS
        Option::<AnyIOPin>::None, // RTS
        &uart_config,
    )?;

    let ctx = ConsoleContext::global(now_us);
    let mut out = UartWriter(&uart);
    let mut console = Console::new(true);
    console.print_banner(&mut out);

    let mut buf = [0u8; 32];
    loop {
        let n = uart.read(&mut buf, NON_BLOCK)?;
        for &byte in &buf[..n] {
            console.process_byte(byte, &ctx, &mut out);
        }

        log_drain::drain_logs(&mut out);

        if n == 0 {
            FreeRtos::delay_ms(5);
        }
    }
}

#[cfg(target_os = "espidf")]
fn now_us() -> i64 {
    unsafe { esp_idf_svc::sys::esp_timer_get_time() }
}

/// `core::fmt::Write` over the console UART.
#[cfg(target_os = "espidf")]
struct UartWriter<'a, 'd>(&'a esp_idf_svc::hal::uart::UartDriver<'d>);

#[cfg(target_os = "espidf")]
impl core::fmt::Write for UartWriter<'_, '_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let mut bytes = s.as_bytes();
        while !bytes.is_empty() {
            let n = self.0.write(bytes).map_err(|_| core::fmt::Error)?;
            bytes = &bytes[n..];
        }
        Ok(())
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    host::run();
}

#[cfg(not(target_os = "espidf"))]
mod host {
    use std::convert::Infallible;
    use std::io::{self, BufRead, Write as _};
    use std::sync::OnceLock;
    use std::thread;
    use std::time::{Duration, Instant};

    use embedded_hal::digital::{ErrorType, OutputPin};
    use trigger_wheel_emulator::hal::AlarmTimer;
    use trigger_wheel_emulator::waveform::INITIAL_INTERVAL_US;

    use super::*;

    static START: OnceLock<Instant> = OnceLock::new();

    fn now_us() -> i64 {
        START.get_or_init(Instant::now).elapsed().as_micros() as i64
    }

    /// Software trigger line. Edges show up in `stats`.
    struct SimPin;

    impl ErrorType for SimPin {
        type Error = Infallible;
    }

    impl OutputPin for SimPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    struct SimAlarm {
        interval_us: u32,
    }

    impl AlarmTimer for SimAlarm {
        fn arm(&mut self, interval_us: u32) {
            self.interval_us = interval_us;
        }
    }

    struct Stdout;

    impl core::fmt::Write for Stdout {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            io::stdout().write_all(s.as_bytes()).map_err(|_| core::fmt::Error)
        }
    }

    pub fn run() {
        let mut signal =
            SignalTimer::new(&CONFIG, &CATALOG, &SIGNAL_STATS, &FAULT_STATE, &TIMER_LOG);

        thread::spawn(move || {
            let mut pin = SimPin;
            let mut alarm = SimAlarm { interval_us: INITIAL_INTERVAL_US };
            let mut deadline = Instant::now();

            loop {
                deadline += Duration::from_micros(alarm.interval_us as u64);
                let now = Instant::now();
                if deadline > now {
                    thread::sleep(deadline - now);
                }
                signal.fire(now_us(), &mut pin, &mut alarm);
            }
        });

        let ctx = ConsoleContext::global(now_us);
        let mut console = Console::new(false);
        let mut out = Stdout;
        console.print_banner(&mut out);

        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            console.process_line(&line, &ctx, &mut out);
            log_drain::drain_logs(&mut out);
            let _ = io::stdout().flush();
        }
    }
}
