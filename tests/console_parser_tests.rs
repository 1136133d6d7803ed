//! Parser tests for console command line parsing

use trigger_wheel_emulator::console::parser::{parse_line, Command};
use trigger_wheel_emulator::console::ConsoleError;
use trigger_wheel_emulator::logging::LogLevel;

#[test]
fn test_parse_line_tokens() {
    let cmd = parse_line("set rpm 4500");
    assert_eq!(cmd.command, "set");
    assert_eq!(cmd.args[0], Some("rpm"));
    assert_eq!(cmd.args[1], Some("4500"));
    assert_eq!(cmd.args[2], None);
    assert_eq!(cmd.arg_count(), 2);
}

#[test]
fn test_parse_trims_whitespace() {
    let cmd = parse_line("  set   wheel\t2  ");
    assert_eq!(cmd.command, "set");
    assert_eq!(cmd.arg(0), Some("wheel"));
    assert_eq!(cmd.arg(1), Some("2"));
}

#[test]
fn test_parse_empty_line() {
    assert_eq!(parse_line("").command, "");
    assert_eq!(Command::parse("   "), Ok(None));
}

#[test]
fn test_signal_commands() {
    assert_eq!(Command::parse("set rpm 4500"), Ok(Some(Command::SetRpm(4500))));
    assert_eq!(Command::parse("set wheel 4"), Ok(Some(Command::SetWheel(4))));
    assert_eq!(Command::parse("enable"), Ok(Some(Command::Enable)));
    assert_eq!(Command::parse(" disable\r"), Ok(Some(Command::Disable)));
}

#[test]
fn test_diagnostic_commands() {
    assert_eq!(Command::parse("show"), Ok(Some(Command::Show)));
    assert_eq!(Command::parse("wheels"), Ok(Some(Command::Wheels)));
    assert_eq!(Command::parse("stats"), Ok(Some(Command::Stats)));
    assert_eq!(Command::parse("help"), Ok(Some(Command::Help)));
    assert_eq!(Command::parse("log debug"), Ok(Some(Command::Log(LogLevel::Debug))));
}

#[test]
fn test_keywords_are_case_sensitive() {
    assert_eq!(Command::parse("Enable"), Err(ConsoleError::InvalidCommand));
    assert_eq!(Command::parse("SET rpm 100"), Err(ConsoleError::InvalidCommand));
    assert_eq!(Command::parse("set RPM 100"), Err(ConsoleError::InvalidCommand));
}

#[test]
fn test_unknown_text() {
    assert_eq!(Command::parse("foobar"), Err(ConsoleError::InvalidCommand));
    assert_eq!(Command::parse("set"), Err(ConsoleError::InvalidCommand));
    assert_eq!(Command::parse("set speed 10"), Err(ConsoleError::InvalidCommand));
}

#[test]
fn test_trailing_tokens_rejected() {
    assert_eq!(Command::parse("enable now"), Err(ConsoleError::InvalidCommand));
    assert_eq!(Command::parse("set rpm 100 200"), Err(ConsoleError::InvalidCommand));
}

#[test]
fn test_unparsable_rpm_is_rejected_not_zeroed() {
    assert_eq!(Command::parse("set rpm fast"), Err(ConsoleError::InvalidValue));
    assert_eq!(Command::parse("set rpm -100"), Err(ConsoleError::InvalidValue));
    assert_eq!(Command::parse("set rpm 1.5"), Err(ConsoleError::InvalidValue));
    assert_eq!(Command::parse("set rpm"), Err(ConsoleError::MissingArg));
}

#[test]
fn test_wheel_index_parse() {
    assert_eq!(Command::parse("set wheel two"), Err(ConsoleError::InvalidValue));
    assert_eq!(Command::parse("set wheel"), Err(ConsoleError::MissingArg));
    // Range is checked at execution
    assert_eq!(Command::parse("set wheel 99"), Ok(Some(Command::SetWheel(99))));
}

#[test]
fn test_oversized_numbers_are_range_errors() {
    assert_eq!(Command::parse("set rpm 4294967296"), Err(ConsoleError::OutOfRange));
    assert_eq!(Command::parse("set rpm 99999999999999999999"), Err(ConsoleError::OutOfRange));
    assert_eq!(
        Command::parse("set wheel 18446744073709551616"),
        Err(ConsoleError::InvalidWheel)
    );
    // Still not a number
    assert_eq!(Command::parse("set rpm 4294967296x"), Err(ConsoleError::InvalidValue));
    assert_eq!(Command::parse("set rpm 4294967295"), Ok(Some(Command::SetRpm(u32::MAX))));
}

#[test]
fn test_log_level_parse() {
    assert_eq!(Command::parse("log"), Err(ConsoleError::MissingArg));
    assert_eq!(Command::parse("log loud"), Err(ConsoleError::InvalidValue));
}
