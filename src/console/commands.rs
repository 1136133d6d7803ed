//! Command execution

use core::fmt::Write;

use super::parser::Command;
use super::ConsoleError;
use crate::config::RuntimeConfig;
use crate::fault::{FaultState, FAULT_STATE};
use crate::log_globals::{CONSOLE_LOG, TIMER_LOG};
use crate::logging::LogStream;
use crate::signal::{SignalStats, SIGNAL_STATS};
use crate::waveform::tooth_period_us;
use crate::wheel::{WheelCatalog, CATALOG};
use crate::{config::CONFIG, rt_info};

/// Command descriptor
pub struct CommandDescriptor {
    pub usage: &'static str,
    pub brief: &'static str,
}

/// Signal control commands, listed after an invalid command.
pub static USAGE: &[CommandDescriptor] = &[
    CommandDescriptor { usage: "set rpm <value>", brief: "Adjusts RPM" },
    CommandDescriptor { usage: "set wheel <index>", brief: "Changes the trigger wheel pattern" },
    CommandDescriptor { usage: "enable", brief: "Enables the output signal" },
    CommandDescriptor { usage: "disable", brief: "Disables the output signal" },
];

/// Diagnostic commands, listed by `help` after [`USAGE`].
pub static DIAGNOSTICS: &[CommandDescriptor] = &[
    CommandDescriptor { usage: "show", brief: "Shows the current configuration" },
    CommandDescriptor { usage: "wheels", brief: "Lists trigger wheel patterns" },
    CommandDescriptor { usage: "stats", brief: "Signal timer statistics" },
    CommandDescriptor { usage: "log <level>", brief: "error|warn|info|debug|trace" },
    CommandDescriptor { usage: "help", brief: "Lists commands" },
];

/// Everything a command may read or change.
pub struct ConsoleContext<'a> {
    pub config: &'a RuntimeConfig,
    pub catalog: &'a WheelCatalog,
    pub stats: &'a SignalStats,
    pub fault: &'a FaultState,
    /// Console stream; accepted changes are logged here.
    pub log: &'a LogStream,
    /// Streams whose level `log <level>` sets.
    pub log_targets: [&'a LogStream; 2],
    /// Microseconds since boot, for log timestamps.
    pub now_us: fn() -> i64,
}

impl ConsoleContext<'static> {
    /// Context over the process-wide statics.
    pub fn global(now_us: fn() -> i64) -> Self {
        Self {
            config: &CONFIG,
            catalog: &CATALOG,
            stats: &SIGNAL_STATS,
            fault: &FAULT_STATE,
            log: &CONSOLE_LOG,
            log_targets: [&TIMER_LOG, &CONSOLE_LOG],
            now_us,
        }
    }
}

/// Write the usage list.
pub fn write_usage(out: &mut dyn Write, table: &[CommandDescriptor]) {
    for c in table {
        let _ = writeln!(out, "{} - {}", c.usage, c.brief);
    }
}

/// Execute a command and write its success report.
///
/// On error nothing is changed and nothing is written; the caller reports.
pub fn execute(
    cmd: &Command,
    ctx: &ConsoleContext<'_>,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    match *cmd {
        Command::SetRpm(rpm) => {
            let rpm = ctx.config.set_rpm(rpm)?;
            rt_info!(ctx.log, (ctx.now_us)(), "rpm set to {}", rpm);
            let _ = writeln!(out, "RPM adjusted to: {}", rpm);
        }
        Command::SetWheel(index) => {
            let wheel = ctx.config.select_wheel(index, ctx.catalog)?;
            rt_info!(ctx.log, (ctx.now_us)(), "wheel {} ({}) selected", index, wheel.name);
            let _ = writeln!(
                out,
                "Trigger wheel pattern set to: {} (teeth: {}, missing: {})",
                wheel.name, wheel.teeth, wheel.missing
            );
        }
        Command::Enable => {
            ctx.config.enable();
            let _ = writeln!(out, "Output signal enabled.");
        }
        Command::Disable => {
            ctx.config.disable();
            let _ = writeln!(out, "Output signal disabled.");
        }
        Command::Show => cmd_show(ctx, out),
        Command::Wheels => cmd_wheels(ctx, out),
        Command::Stats => cmd_stats(ctx, out),
        Command::Log(level) => {
            for stream in ctx.log_targets {
                stream.set_level(level);
            }
            let _ = writeln!(out, "log level: {}", level.as_str());
        }
        Command::Help => {
            write_usage(out, USAGE);
            write_usage(out, DIAGNOSTICS);
        }
    }
    Ok(())
}

fn cmd_show(ctx: &ConsoleContext<'_>, out: &mut dyn Write) {
    let snap = ctx.config.snapshot();

    let _ = writeln!(out, "enabled={}", snap.enabled);
    let _ = writeln!(out, "rpm={}", snap.rpm);
    match ctx.catalog.get(snap.wheel_index) {
        Ok(wheel) => {
            let _ = writeln!(out, "wheel={} ({})", snap.wheel_index, wheel.name);
            let _ = writeln!(out, "tooth_period_us={}", tooth_period_us(wheel, snap.rpm));
        }
        Err(_) => {
            let _ = writeln!(out, "wheel={} (invalid)", snap.wheel_index);
        }
    }
}

fn cmd_wheels(ctx: &ConsoleContext<'_>, out: &mut dyn Write) {
    let selected = ctx.config.wheel_index();
    for (i, wheel) in ctx.catalog.iter().enumerate() {
        let marker = if i == selected { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{}{}: {:<5} teeth={} missing={}",
            marker, i, wheel.name, wheel.teeth, wheel.missing
        );
    }
}

fn cmd_stats(ctx: &ConsoleContext<'_>, out: &mut dyn Write) {
    let stats = ctx.stats.snapshot();
    let _ = writeln!(out, "firings={}", stats.firings);
    let _ = writeln!(out, "pulses={}", stats.pulses);
    let _ = writeln!(out, "gaps={}", stats.gaps);
    let _ = writeln!(out, "revolutions={}", stats.revolutions);
    let _ = writeln!(out, "idle={}", stats.idle);

    let fault = ctx.fault.snapshot();
    if fault.active {
        let _ = writeln!(
            out,
            "fault={} ({}) count={}",
            fault.code.as_str(),
            fault.data,
            fault.count
        );
    } else {
        let _ = writeln!(out, "fault=none count={}", fault.count);
    }
}
