//! Command execution and console tests

use trigger_wheel_emulator::config::RuntimeConfig;
use trigger_wheel_emulator::console::{
    execute, Command, Console, ConsoleContext, ConsoleError, USAGE,
};
use trigger_wheel_emulator::fault::{FaultCode, FaultState};
use trigger_wheel_emulator::logging::{LogLevel, LogStream};
use trigger_wheel_emulator::signal::SignalStats;
use trigger_wheel_emulator::wheel::CATALOG;

struct Fixture {
    config: RuntimeConfig,
    stats: SignalStats,
    fault: FaultState,
    console_log: LogStream,
    timer_log: LogStream,
}

impl Fixture {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::new(),
            stats: SignalStats::new(),
            fault: FaultState::new(),
            console_log: LogStream::new(),
            timer_log: LogStream::new(),
        }
    }

    fn ctx(&self) -> ConsoleContext<'_> {
        ConsoleContext {
            config: &self.config,
            catalog: &CATALOG,
            stats: &self.stats,
            fault: &self.fault,
            log: &self.console_log,
            log_targets: [&self.timer_log, &self.console_log],
            now_us: || 0,
        }
    }

    fn run(&self, line: &str) -> (Option<Result<(), ConsoleError>>, TestOutput) {
        let mut console = Console::new(false);
        let mut out = TestOutput::new();
        let result = console.process_line(line, &self.ctx(), &mut out);
        (result, out)
    }
}

#[test]
fn test_set_rpm_round_trip() {
    let fx = Fixture::new();
    let (result, out) = fx.run("set rpm 4500");

    assert_eq!(result, Some(Ok(())));
    assert!(out.contains("RPM adjusted to: 4500"));
    assert_eq!(fx.config.snapshot().rpm.get(), 4500);

    let (_, out) = fx.run("show");
    assert!(out.contains("rpm=4500"));
}

#[test]
fn test_set_rpm_zero_rejected() {
    let fx = Fixture::new();
    let (result, out) = fx.run("set rpm 0");

    assert_eq!(result, Some(Err(ConsoleError::OutOfRange)));
    assert!(out.contains("E04"));
    assert_eq!(fx.config.rpm().get(), 1000);
}

#[test]
fn test_set_rpm_unparsable_rejected() {
    let fx = Fixture::new();
    let (result, out) = fx.run("set rpm abc");

    assert_eq!(result, Some(Err(ConsoleError::InvalidValue)));
    assert!(out.contains("E02: invalid value"));
    assert_eq!(fx.config.rpm().get(), 1000);
}

#[test]
fn test_oversized_values_report_range() {
    let fx = Fixture::new();

    let (result, out) = fx.run("set rpm 4294967296");
    assert_eq!(result, Some(Err(ConsoleError::OutOfRange)));
    assert!(out.contains("E04"));
    assert_eq!(fx.config.rpm().get(), 1000);

    let (result, out) = fx.run("set wheel 18446744073709551616");
    assert_eq!(result, Some(Err(ConsoleError::InvalidWheel)));
    assert!(out.contains("trigger wheel pattern invalid"));
    assert_eq!(fx.config.wheel_index(), 0);
}

#[test]
fn test_set_wheel_reports_pattern() {
    let fx = Fixture::new();
    let (result, out) = fx.run("set wheel 2");

    assert_eq!(result, Some(Ok(())));
    assert!(out.contains("Trigger wheel pattern set to: 24-1 (teeth: 24, missing: 1)"));
    assert_eq!(fx.config.wheel_index(), 2);
}

#[test]
fn test_set_wheel_one_past_end_rejected() {
    let fx = Fixture::new();
    fx.run("set wheel 3");

    let line = format!("set wheel {}", CATALOG.len());
    let (result, out) = fx.run(&line);
    assert_eq!(result, Some(Err(ConsoleError::InvalidWheel)));
    assert!(out.contains("trigger wheel pattern invalid"));
    assert_eq!(fx.config.wheel_index(), 3);

    let (result, _) = fx.run("set wheel 99");
    assert_eq!(result, Some(Err(ConsoleError::InvalidWheel)));
    assert_eq!(fx.config.wheel_index(), 3);
}

#[test]
fn test_enable_disable() {
    let fx = Fixture::new();

    let (_, out) = fx.run("enable");
    assert!(out.contains("Output signal enabled."));
    assert!(fx.config.is_enabled());

    let (_, out) = fx.run("disable");
    assert!(out.contains("Output signal disabled."));
    assert!(!fx.config.is_enabled());
}

#[test]
fn test_invalid_command_lists_usage() {
    let fx = Fixture::new();
    let before = fx.config.snapshot();
    let (result, out) = fx.run("start engine");

    assert_eq!(result, Some(Err(ConsoleError::InvalidCommand)));
    assert!(out.contains("E01: invalid command"));
    for c in USAGE {
        assert!(out.contains(c.usage), "usage should list '{}'", c.usage);
    }
    assert_eq!(fx.config.snapshot(), before);
}

#[test]
fn test_blank_line_does_nothing() {
    let fx = Fixture::new();
    let (result, out) = fx.run("   ");

    assert_eq!(result, None);
    assert!(out.as_str().is_empty());
}

#[test]
fn test_wheels_marks_selection() {
    let fx = Fixture::new();
    fx.run("set wheel 1");
    let (_, out) = fx.run("wheels");

    assert!(out.contains("*1: 60-2"));
    assert!(out.contains(" 0: 36-1"));
    assert!(out.contains("teeth=12 missing=2"));
}

#[test]
fn test_show_tooth_period() {
    let fx = Fixture::new();
    fx.run("set wheel 4");
    fx.run("set rpm 3000");
    let (_, out) = fx.run("show");

    assert!(out.contains("enabled=false"));
    assert!(out.contains("wheel=4 (12-0)"));
    assert!(out.contains("tooth_period_us=1666"));
}

#[test]
fn test_stats_reports_fault() {
    let fx = Fixture::new();
    fx.fault.set(FaultCode::WheelIndex, 7);
    let (_, out) = fx.run("stats");

    assert!(out.contains("firings=0"));
    assert!(out.contains("fault=wheel-index (7) count=1"));
}

#[test]
fn test_log_level_applies_to_both_streams() {
    let fx = Fixture::new();
    let (result, out) = fx.run("log debug");

    assert_eq!(result, Some(Ok(())));
    assert!(out.contains("log level: DEBUG"));
    assert_eq!(fx.timer_log.level(), LogLevel::Debug);
    assert_eq!(fx.console_log.level(), LogLevel::Debug);
}

#[test]
fn test_accepted_change_is_logged() {
    let fx = Fixture::new();
    fx.run("set wheel 0");

    let entry = fx.console_log.drain().unwrap();
    assert_eq!(entry.level, LogLevel::Info);
    assert_eq!(entry.message(), "wheel 0 (36-1) selected");
}

#[test]
fn test_execute_without_console() {
    let fx = Fixture::new();
    let mut out = TestOutput::new();

    assert_eq!(
        execute(&Command::SetRpm(30_001), &fx.ctx(), &mut out),
        Err(ConsoleError::OutOfRange)
    );
    assert!(out.as_str().is_empty());
    assert_eq!(execute(&Command::Help, &fx.ctx(), &mut out), Ok(()));
    assert!(out.contains("set wheel <index>"));
    assert!(out.contains("stats"));
}

#[test]
fn test_byte_stream_crlf() {
    let fx = Fixture::new();
    let ctx = fx.ctx();
    let mut console = Console::new(false);
    let mut out = TestOutput::new();
    let mut results = Vec::new();

    for &b in b"set rpm 2000\r\nenable\n\r\n" {
        if let Some(r) = console.process_byte(b, &ctx, &mut out) {
            results.push(r);
        }
    }

    assert_eq!(results, [Ok(()), Ok(())]);
    assert_eq!(fx.config.rpm().get(), 2000);
    assert!(fx.config.is_enabled());
}

#[test]
fn test_byte_stream_backspace_and_ctrl_c() {
    let fx = Fixture::new();
    let ctx = fx.ctx();
    let mut console = Console::new(true);
    let mut out = TestOutput::new();

    for &b in b"disablx\x08e" {
        console.process_byte(b, &ctx, &mut out);
    }
    // Ctrl+C drops the pending line
    console.process_byte(0x03, &ctx, &mut out);
    assert_eq!(console.process_byte(b'\n', &ctx, &mut out), None);

    for &b in b"enablx\x7fe" {
        console.process_byte(b, &ctx, &mut out);
    }
    assert_eq!(console.process_byte(b'\r', &ctx, &mut out), Some(Ok(())));
    assert!(fx.config.is_enabled());
    assert!(out.contains("> "));
}

#[test]
fn test_overlong_line_not_executed() {
    let fx = Fixture::new();
    let ctx = fx.ctx();
    let mut console = Console::new(false);
    let mut out = TestOutput::new();

    let mut line = String::from("enable");
    line.push_str(&" ".repeat(100));
    for b in line.bytes() {
        console.process_byte(b, &ctx, &mut out);
    }

    assert_eq!(
        console.process_byte(b'\n', &ctx, &mut out),
        Some(Err(ConsoleError::InvalidCommand))
    );
    assert!(!fx.config.is_enabled());
}

// Test output buffer
struct TestOutput {
    buf: [u8; 2048],
    len: usize,
}

impl TestOutput {
    fn new() -> Self {
        Self { buf: [0u8; 2048], len: 0 }
    }

    fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    fn contains(&self, s: &str) -> bool {
        self.as_str().contains(s)
    }
}

impl core::fmt::Write for TestOutput {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let bytes = s.as_bytes();
        let available = self.buf.len() - self.len;
        let to_copy = bytes.len().min(available);
        self.buf[self.len..self.len + to_copy].copy_from_slice(&bytes[..to_copy]);
        self.len += to_copy;
        Ok(())
    }
}
