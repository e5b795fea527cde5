// src/probe.rs

//! The execution-and-reporting pipeline.
//!
//! run child -> capture -> build report -> serialize -> transmit (or forward
//! locally, depending on [`ReportMode`]).

use std::ffi::OsString;
use std::io::Write;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::ProbeConfig;
use crate::errors::Result;
use crate::exec::signals::child_signal_diagnostic;
use crate::exec::{CapturedOutput, ChildOutcome, ProcessRunner};
use crate::report::{Report, ReportBuilder};
use crate::transport::{Delivery, RetryPolicy, TcpTransport, Transmitter, Transport};
use crate::types::ReportMode;
use crate::wire::Serializer;

/// What one invocation amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Exit code the probe process should return.
    pub exit_code: i32,
    pub outcome: ChildOutcome,
    /// `None` when nothing was sent: local mode, or a signaled child.
    pub delivery: Option<Delivery>,
}

pub struct Probe<T> {
    runner: ProcessRunner,
    serializer: Serializer,
    transmitter: Transmitter<T>,
    mode: ReportMode,
}

impl Probe<TcpTransport> {
    /// Production wiring: TCP transport to the configured collector.
    pub fn from_config(config: &ProbeConfig) -> Self {
        let transport = TcpTransport::new(
            config.collector.host.clone(),
            config.collector.port,
            Duration::from_millis(config.collector.connect_timeout_ms),
        );
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> Probe<T> {
    pub fn new(
        runner: ProcessRunner,
        serializer: Serializer,
        transmitter: Transmitter<T>,
        mode: ReportMode,
    ) -> Self {
        Self {
            runner,
            serializer,
            transmitter,
            mode,
        }
    }

    /// Everything from `config`, except the transport.
    pub fn with_transport(config: &ProbeConfig, transport: T) -> Self {
        let policy = RetryPolicy::new(
            config.retry.max_attempts,
            Duration::from_millis(config.retry.delay_ms),
        );
        Self::new(
            ProcessRunner::new(config.capture.mode),
            Serializer::new(config.wire.tags.clone(), config.wire.max_packet_len),
            Transmitter::new(transport, policy),
            config.report.mode,
        )
    }

    pub fn transmitter(&self) -> &Transmitter<T> {
        &self.transmitter
    }

    /// Run `command` once and report on it.
    ///
    /// A signaled child is diagnosed on stderr and yields exit code 1 with no
    /// report. Otherwise the exit code is the child's in local mode and 0 in
    /// collector mode, where delivery failures are logged, never returned.
    pub async fn run(&mut self, command: &[OsString]) -> Result<RunSummary> {
        let execution = self.runner.run(command).await?;

        let code = match execution.outcome {
            ChildOutcome::Exited(code) => code,
            ChildOutcome::Signaled(sig) => {
                eprintln!("{}", child_signal_diagnostic(sig));
                return Ok(RunSummary {
                    exit_code: 1,
                    outcome: execution.outcome,
                    delivery: None,
                });
            }
        };

        let report = ReportBuilder::new(command.iter().cloned())
            .exit_code(code)
            .output(execution.output)
            .times(execution.times)
            .build();

        match self.mode {
            ReportMode::Local => {
                forward_outputs(report.output())?;
                debug!(times = ?report.times(), "run finished (local mode)");
                Ok(RunSummary {
                    exit_code: code,
                    outcome: execution.outcome,
                    delivery: None,
                })
            }
            ReportMode::Collector => {
                let delivery = self.report(&report).await;
                Ok(RunSummary {
                    exit_code: 0,
                    outcome: execution.outcome,
                    delivery: Some(delivery),
                })
            }
        }
    }

    async fn report(&mut self, report: &Report) -> Delivery {
        let packet = self.serializer.serialize(report);
        let delivery = self.transmitter.send(&packet).await;
        info!(
            sent = delivery.is_sent(),
            attempts = delivery.attempts(),
            "report handled"
        );
        delivery
    }
}

/// Replay captured output on the probe's own stdout/stderr.
fn forward_outputs(output: &CapturedOutput) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.stdout.bytes())?;
    stdout.flush()?;

    let mut stderr = std::io::stderr().lock();
    stderr.write_all(output.stderr.bytes())?;
    stderr.flush()?;
    Ok(())
}
