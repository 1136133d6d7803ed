//! Serial command interface
//!
//! Polled from the main loop - no dedicated task.
//! Zero heap allocation - all static buffers.

pub mod commands;
pub mod console;
pub mod error;
pub mod line_buffer;
pub mod parser;

pub use commands::{execute, write_usage, ConsoleContext, DIAGNOSTICS, USAGE};
pub use console::Console;
pub use error::ConsoleError;
pub use line_buffer::LineBuffer;
pub use parser::{parse_line, Command, ParsedCommand};
