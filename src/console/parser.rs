//! Command line parser
//!
//! Two stages: [`parse_line`] splits on whitespace, [`Command::parse`] turns
//! the tokens into a closed command type. Keywords are case-sensitive.

use core::num::{IntErrorKind, ParseIntError};
use core::str::FromStr;

use super::ConsoleError;
use crate::logging::LogLevel;

/// Maximum arguments after the command word.
pub const MAX_ARGS: usize = 3;

/// Tokenized command line
#[derive(Debug, Clone)]
pub struct ParsedCommand<'a> {
    /// The command name (first token)
    pub command: &'a str,
    pub args: [Option<&'a str>; MAX_ARGS],
}

impl<'a> ParsedCommand<'a> {
    /// Get argument by index (0-based)
    pub fn arg(&self, idx: usize) -> Option<&'a str> {
        self.args.get(idx).copied().flatten()
    }

    /// Number of arguments present
    pub fn arg_count(&self) -> usize {
        self.args.iter().filter(|a| a.is_some()).count()
    }
}

/// Split a command line into command and arguments.
///
/// Surrounding whitespace is ignored. Tokens past `MAX_ARGS` are dropped;
/// `MAX_ARGS` is one more than any command takes, so trailing junk still shows.
pub fn parse_line(line: &str) -> ParsedCommand<'_> {
    let mut parts = line.split_whitespace();

    let command = parts.next().unwrap_or("");

    let mut args = [None; MAX_ARGS];
    for (i, arg) in parts.take(MAX_ARGS).enumerate() {
        args[i] = Some(arg);
    }

    ParsedCommand { command, args }
}

/// Every command the console understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `set rpm <uint>`
    SetRpm(u32),
    /// `set wheel <index>`
    SetWheel(usize),
    /// `enable`
    Enable,
    /// `disable`
    Disable,
    /// `show`
    Show,
    /// `wheels`
    Wheels,
    /// `stats`
    Stats,
    /// `log <level>`
    Log(LogLevel),
    /// `help`
    Help,
}

impl Command {
    /// Parse a full line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, ConsoleError> {
        let cmd = parse_line(line);
        if cmd.command.is_empty() {
            return Ok(None);
        }
        Self::from_parsed(&cmd).map(Some)
    }

    /// Build a command from tokens.
    pub fn from_parsed(cmd: &ParsedCommand<'_>) -> Result<Self, ConsoleError> {
        let (command, arity) = match cmd.command {
            "set" => {
                let name = cmd.arg(0).ok_or(ConsoleError::InvalidCommand)?;
                let command = match name {
                    "rpm" => {
                        let value = cmd.arg(1).ok_or(ConsoleError::MissingArg)?;
                        Self::SetRpm(parse_uint(value, ConsoleError::OutOfRange)?)
                    }
                    "wheel" => {
                        let value = cmd.arg(1).ok_or(ConsoleError::MissingArg)?;
                        Self::SetWheel(parse_uint(value, ConsoleError::InvalidWheel)?)
                    }
                    _ => return Err(ConsoleError::InvalidCommand),
                };
                (command, 2)
            }
            "log" => {
                let value = cmd.arg(0).ok_or(ConsoleError::MissingArg)?;
                let level = LogLevel::parse(value).ok_or(ConsoleError::InvalidValue)?;
                (Self::Log(level), 1)
            }
            "enable" => (Self::Enable, 0),
            "disable" => (Self::Disable, 0),
            "show" => (Self::Show, 0),
            "wheels" => (Self::Wheels, 0),
            "stats" => (Self::Stats, 0),
            "help" => (Self::Help, 0),
            _ => return Err(ConsoleError::InvalidCommand),
        };

        if cmd.arg_count() > arity {
            return Err(ConsoleError::InvalidCommand);
        }
        Ok(command)
    }
}

/// Parse an unsigned number. Digits too large for `T` are a range problem,
/// anything else is not a number.
fn parse_uint<T>(value: &str, overflow: ConsoleError) -> Result<T, ConsoleError>
where
    T: FromStr<Err = ParseIntError>,
{
    value.parse().map_err(|e: ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow => overflow,
        _ => ConsoleError::InvalidValue,
    })
}
