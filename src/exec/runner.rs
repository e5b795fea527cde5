// src/exec/runner.rs

//! Spawn the wrapped command, wait for it, and classify how it ended.

use std::ffi::OsString;
use std::io;
use std::os::unix::process::ExitStatusExt;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;

use nix::errno::Errno;
use tokio::process::{Child, ChildStderr, ChildStdout, Command};
use tracing::{debug, error, info, warn};

use crate::errors::{ProbeError, Result};
use crate::exec::capture::{self, CapturedOutput, StreamCapture};
use crate::shutdown::TrackedChild;
use crate::timing::{SystemTimeSource, TimeReport, TimeSample, TimeSource};
use crate::types::CaptureMode;

/// Terminal state of a child process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildOutcome {
    /// Normal exit with this status code.
    Exited(i32),
    /// Killed by this signal number.
    Signaled(i32),
}

impl ChildOutcome {
    fn from_status(status: ExitStatus) -> Self {
        match (status.code(), status.signal()) {
            (Some(code), _) => ChildOutcome::Exited(code),
            (None, Some(sig)) => ChildOutcome::Signaled(sig),
            (None, None) => ChildOutcome::Exited(-1),
        }
    }
}

/// Everything the runner learned about one invocation.
///
/// `output` is only populated for `Exited`; a signaled child produces no
/// report, so its pipes are never read.
#[derive(Debug, Clone)]
pub struct Execution {
    pub outcome: ChildOutcome,
    pub times: TimeReport,
    pub output: CapturedOutput,
}

/// The spawned child plus the parent's read ends of its stdout/stderr pipes.
///
/// Dropping the handle closes both pipes and, because the child is spawned
/// with `kill_on_drop`, kills a child that is still running.
#[derive(Debug)]
pub struct ChildHandle {
    pub pid: Option<u32>,
    child: Child,
    stdout: Option<ChildStdout>,
    stderr: Option<ChildStderr>,
}

impl ChildHandle {
    fn new(mut child: Child) -> Self {
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        Self {
            pid: child.id(),
            child,
            stdout,
            stderr,
        }
    }
}

/// Runs one command per call.
#[derive(Clone)]
pub struct ProcessRunner {
    time: Arc<dyn TimeSource>,
    capture_mode: CaptureMode,
}

impl ProcessRunner {
    pub fn new(capture_mode: CaptureMode) -> Self {
        Self::with_time_source(Arc::new(SystemTimeSource), capture_mode)
    }

    pub fn with_time_source(time: Arc<dyn TimeSource>, capture_mode: CaptureMode) -> Self {
        Self { time, capture_mode }
    }

    /// Spawn `command` (element 0 resolved through `PATH`), wait for it to
    /// terminate, and capture its output.
    ///
    /// An exec failure (command missing, not executable) is reported the way
    /// the child itself would report it: exit status 1 with a diagnostic on
    /// its stderr. Any other spawn failure is fatal and returned as
    /// [`ProbeError::Spawn`].
    pub async fn run(&self, command: &[OsString]) -> Result<Execution> {
        let rendered = render_command(command);
        let Some((program, args)) = command.split_first() else {
            return Err(ProbeError::Spawn {
                command: rendered,
                source: io::Error::new(io::ErrorKind::InvalidInput, "empty command vector"),
            });
        };

        let start = self.time.now();

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) if is_exec_failure(&e) => {
                let finish = self.time.now();
                warn!(cmd = %rendered, error = %e, "exec failed; reporting exit status 1");
                let diagnostic = format!(
                    "[Error] execprobe: exec failed: {}: {e}\n",
                    program.to_string_lossy()
                );
                return Ok(Execution {
                    outcome: ChildOutcome::Exited(1),
                    times: TimeReport::new(start, finish),
                    output: CapturedOutput {
                        stdout: StreamCapture::empty(),
                        stderr: StreamCapture::from_bytes(diagnostic.as_bytes()),
                    },
                });
            }
            Err(e) => {
                error!(cmd = %rendered, error = %e, "could not set up child process");
                return Err(ProbeError::Spawn {
                    command: rendered,
                    source: e,
                });
            }
        };

        let mut handle = ChildHandle::new(child);
        let _tracked = TrackedChild::new(handle.pid);
        info!(cmd = %rendered, pid = ?handle.pid, "child process started");

        let execution = match self.capture_mode {
            CaptureMode::SingleRead => self.wait_then_read(&mut handle, start).await?,
            CaptureMode::Drain => self.wait_while_draining(&mut handle, start).await?,
        };

        match execution.outcome {
            ChildOutcome::Exited(code) => info!(
                pid = ?handle.pid,
                exit_code = code,
                stdout_bytes = execution.output.stdout.size(),
                stderr_bytes = execution.output.stderr.size(),
                "child process exited"
            ),
            ChildOutcome::Signaled(sig) => {
                warn!(pid = ?handle.pid, signal = sig, "child process killed by signal")
            }
        }

        Ok(execution)
    }

    async fn wait_then_read(
        &self,
        handle: &mut ChildHandle,
        start: TimeSample,
    ) -> Result<Execution> {
        let status = handle.child.wait().await?;
        let finish = self.time.now();
        let outcome = ChildOutcome::from_status(status);

        let output = match outcome {
            ChildOutcome::Exited(_) => {
                capture::capture(handle.stdout.as_mut(), handle.stderr.as_mut()).await
            }
            ChildOutcome::Signaled(_) => CapturedOutput::default(),
        };

        Ok(Execution {
            outcome,
            times: TimeReport::new(start, finish),
            output,
        })
    }

    async fn wait_while_draining(
        &self,
        handle: &mut ChildHandle,
        start: TimeSample,
    ) -> Result<Execution> {
        let ChildHandle {
            child,
            stdout,
            stderr,
            ..
        } = handle;

        let time = Arc::clone(&self.time);
        let waited = async move {
            let status = child.wait().await;
            (status, time.now())
        };

        let ((status, finish), out, err) = tokio::join!(
            waited,
            capture::drain(stdout.as_mut(), "stdout"),
            capture::drain(stderr.as_mut(), "stderr"),
        );

        let outcome = ChildOutcome::from_status(status?);
        let output = match outcome {
            ChildOutcome::Exited(_) => CapturedOutput {
                stdout: out,
                stderr: err,
            },
            ChildOutcome::Signaled(_) => {
                debug!("discarding drained output of signaled child");
                CapturedOutput::default()
            }
        };

        Ok(Execution {
            outcome,
            times: TimeReport::new(start, finish),
            output,
        })
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(CaptureMode::default())
    }
}

/// Errors that mean "the target could not be executed", as opposed to the
/// parent failing to create pipes or a process.
fn is_exec_failure(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
    ) || e.raw_os_error() == Some(Errno::ENOEXEC as i32)
}

/// Lossy, space-joined rendering of a command vector for log lines.
pub fn render_command(command: &[OsString]) -> String {
    command
        .iter()
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
