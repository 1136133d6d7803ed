//! Console error types

/// Console error with code and message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// E01: Unrecognized command text
    InvalidCommand,
    /// E02: Argument does not parse
    InvalidValue,
    /// E03: Missing required argument
    MissingArg,
    /// E04: Value out of allowed range
    OutOfRange,
    /// E05: Wheel index not in the catalog
    InvalidWheel,
}

impl ConsoleError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidCommand => "E01",
            Self::InvalidValue => "E02",
            Self::MissingArg => "E03",
            Self::OutOfRange => "E04",
            Self::InvalidWheel => "E05",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidCommand => "invalid command",
            Self::InvalidValue => "invalid value",
            Self::MissingArg => "missing argument",
            Self::OutOfRange => "out of range",
            Self::InvalidWheel => "trigger wheel pattern invalid",
        }
    }
}

impl From<crate::config::ConfigError> for ConsoleError {
    fn from(e: crate::config::ConfigError) -> Self {
        match e {
            crate::config::ConfigError::RpmOutOfRange(_) => Self::OutOfRange,
            crate::config::ConfigError::InvalidWheel(_) => Self::InvalidWheel,
        }
    }
}

impl core::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}
