//! Log output on the console UART.
//!
//! The console loop owns the UART, so log entries are drained there between
//! input polls instead of from a dedicated task. The timer stream is drained
//! first.
//!
//! Format: `[timestamp_us] LEVEL: message`

use core::fmt::Write;

use crate::logging::{LogEntry, LogStream};

/// Write one formatted entry.
pub fn write_entry(out: &mut dyn Write, entry: &LogEntry) {
    let _ = write!(
        out,
        "[{:10}] {}: {}\r\n",
        entry.timestamp_us,
        entry.level.as_str(),
        entry.message()
    );
}

/// Drain every pending entry of `streams` into `out`, in order.
///
/// Dropped-entry counters are reported once and reset. Returns the number of
/// entries written.
pub fn drain_streams<const N: usize>(
    out: &mut dyn Write,
    streams: &[(&str, &LogStream<N>)],
) -> usize {
    let mut written = 0;

    for (_, stream) in streams {
        while let Some(entry) = stream.drain() {
            write_entry(out, &entry);
            written += 1;
        }
    }

    for (name, stream) in streams {
        let dropped = stream.take_dropped();
        if dropped > 0 {
            let _ = write!(out, "[WARN] dropped {} {} log entries\r\n", dropped, name);
        }
    }

    written
}

/// Drain the global timer and console streams.
pub fn drain_logs(out: &mut dyn Write) -> usize {
    drain_streams(
        out,
        &[
            ("timer", &crate::log_globals::TIMER_LOG),
            ("console", &crate::log_globals::CONSOLE_LOG),
        ],
    )
}
