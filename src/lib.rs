// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod probe;
pub mod report;
pub mod shutdown;
pub mod timing;
pub mod transport;
pub mod types;
pub mod wire;

use tracing::{info, warn};

use crate::cli::CliArgs;
use crate::config::ProbeConfig;
use crate::errors::Result;
use crate::exec::runner::render_command;
use crate::exec::signals::probe_signal_diagnostic;
use crate::probe::Probe;
use crate::shutdown::SelfSignals;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - probe signal listeners
/// - process runner / serializer / transmitter (via [`Probe`])
///
/// and returns the exit code for the probe process. A fatal signal to the
/// probe abandons the in-flight run (the child is killed with it) and
/// yields 1.
pub async fn run(args: CliArgs, config: ProbeConfig) -> Result<i32> {
    let mut signals = SelfSignals::install()?;
    let mut probe = Probe::from_config(&config);

    info!(
        cmd = %render_command(&args.command),
        collector = %format!("{}:{}", config.collector.host, config.collector.port),
        mode = ?config.report.mode,
        "execprobe starting"
    );

    tokio::select! {
        summary = probe.run(&args.command) => Ok(summary?.exit_code),
        sig = signals.recv() => {
            warn!(signal = sig, "probe received fatal signal; abandoning run");
            eprintln!("{}", probe_signal_diagnostic(sig));
            Ok(1)
        }
    }
}
