//! Byte-level console integrating line editing, parsing and execution

use core::fmt::Write;

use super::{
    execute, write_usage, Command, ConsoleContext, ConsoleError, LineBuffer, DIAGNOSTICS, USAGE,
};

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");

/// Console state machine
pub struct Console {
    line: LineBuffer,
    /// Echo input and show a prompt (interactive terminals).
    echo: bool,
    /// Previous byte was `\r`, so a following `\n` is the same line end.
    after_cr: bool,
}

impl Console {
    /// Create new console
    pub const fn new(echo: bool) -> Self {
        Self {
            line: LineBuffer::new(),
            echo,
            after_cr: false,
        }
    }

    /// Process a single input byte
    ///
    /// Returns Some(result) if a command line completed, None if more input
    /// is needed or the line was blank.
    pub fn process_byte(
        &mut self,
        byte: u8,
        ctx: &ConsoleContext<'_>,
        out: &mut dyn Write,
    ) -> Option<Result<(), ConsoleError>> {
        let after_cr = core::mem::replace(&mut self.after_cr, byte == b'\r');

        match byte {
            b'\n' if after_cr => None,

            // Enter
            b'\r' | b'\n' => {
                if self.echo {
                    let _ = writeln!(out);
                }

                let result = if self.line.overflowed() {
                    self.report(Err(ConsoleError::InvalidCommand), out);
                    Some(Err(ConsoleError::InvalidCommand))
                } else {
                    let line = self.line.as_str();
                    let result = run_line(line, ctx, out);
                    if let Some(result) = result {
                        self.report(result, out);
                    }
                    result
                };

                self.line.clear();
                self.print_prompt(out);
                result
            }

            // Backspace
            0x7F | 0x08 => {
                if !self.line.is_empty() {
                    self.line.backspace();
                    if self.echo {
                        let _ = write!(out, "\x08 \x08");
                    }
                }
                None
            }

            // Ctrl+C
            0x03 => {
                if self.echo {
                    let _ = writeln!(out, "^C");
                }
                self.line.clear();
                self.print_prompt(out);
                None
            }

            // Ctrl+U (clear line)
            0x15 => {
                if self.echo {
                    for _ in 0..self.line.len() {
                        let _ = write!(out, "\x08 \x08");
                    }
                }
                self.line.clear();
                None
            }

            // Printable character
            0x20..=0x7E => {
                if self.line.push(byte) && self.echo {
                    let _ = write!(out, "{}", byte as char);
                }
                None
            }

            _ => None,
        }
    }

    /// Execute a complete line (already split off the byte stream).
    pub fn process_line(
        &mut self,
        line: &str,
        ctx: &ConsoleContext<'_>,
        out: &mut dyn Write,
    ) -> Option<Result<(), ConsoleError>> {
        let result = run_line(line, ctx, out);
        if let Some(result) = result {
            self.report(result, out);
        }
        result
    }

    fn report(&self, result: Result<(), ConsoleError>, out: &mut dyn Write) {
        match result {
            Ok(()) => {}
            Err(ConsoleError::InvalidCommand) => {
                let _ = writeln!(out, "{}. Available:", ConsoleError::InvalidCommand);
                write_usage(out, USAGE);
            }
            Err(e) => {
                let _ = writeln!(out, "{}", e);
            }
        }
    }

    /// Print the prompt (interactive mode only)
    pub fn print_prompt(&self, out: &mut dyn Write) {
        if self.echo {
            let _ = write!(out, "> ");
        }
    }

    /// Print welcome banner
    pub fn print_banner(&self, out: &mut dyn Write) {
        let _ = writeln!(out, "{}", VERSION);
        let _ = writeln!(out, "Trigger wheel signal generator.");
        let _ = writeln!(out, "Available commands:");
        write_usage(out, USAGE);
        write_usage(out, DIAGNOSTICS);
        self.print_prompt(out);
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new(false)
    }
}

fn run_line(
    line: &str,
    ctx: &ConsoleContext<'_>,
    out: &mut dyn Write,
) -> Option<Result<(), ConsoleError>> {
    match Command::parse(line) {
        Ok(None) => None,
        Ok(Some(cmd)) => Some(execute(&cmd, ctx, out)),
        Err(e) => Some(Err(e)),
    }
}
