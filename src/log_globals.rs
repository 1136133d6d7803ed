//! Global log stream instances.
//!
//! One stream per producer context, matching the SPSC ring in
//! [`crate::logging`].

use crate::logging::LogStream;

/// Timer ISR stream. Only the signal timer pushes here.
pub static TIMER_LOG: LogStream = LogStream::new();

/// Command context stream. Pushed and drained by the console loop.
pub static CONSOLE_LOG: LogStream = LogStream::new();
