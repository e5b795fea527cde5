// src/report/model.rs

use std::ffi::OsString;

use crate::exec::CapturedOutput;
use crate::timing::TimeReport;

/// Command, exit status, captured output and timings of one run.
///
/// Built once by [`ReportBuilder`](super::ReportBuilder) and read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    command: Vec<OsString>,
    exit_code: i32,
    output: CapturedOutput,
    times: TimeReport,
}

impl Report {
    pub(super) fn new(
        command: Vec<OsString>,
        exit_code: i32,
        output: CapturedOutput,
        times: TimeReport,
    ) -> Self {
        Self {
            command,
            exit_code,
            output,
            times,
        }
    }

    pub fn command(&self) -> &[OsString] {
        &self.command
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Whether the run counts as failed on the wire (any non-zero code).
    pub fn failed(&self) -> bool {
        self.exit_code != 0
    }

    pub fn output(&self) -> &CapturedOutput {
        &self.output
    }

    pub fn times(&self) -> &TimeReport {
        &self.times
    }
}
