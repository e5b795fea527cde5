// src/report/builder.rs

use std::ffi::OsString;

use crate::exec::CapturedOutput;
use crate::report::model::Report;
use crate::timing::TimeReport;

/// Assembles a [`Report`].
///
/// Unset parts default to empty output, zeroed timings and exit code 0.
#[derive(Debug, Clone, Default)]
pub struct ReportBuilder {
    command: Vec<OsString>,
    exit_code: i32,
    output: CapturedOutput,
    times: TimeReport,
}

impl ReportBuilder {
    pub fn new<I, S>(command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            command: command.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn exit_code(mut self, code: i32) -> Self {
        self.exit_code = code;
        self
    }

    pub fn output(mut self, output: CapturedOutput) -> Self {
        self.output = output;
        self
    }

    pub fn times(mut self, times: TimeReport) -> Self {
        self.times = times;
        self
    }

    pub fn build(self) -> Report {
        Report::new(self.command, self.exit_code, self.output, self.times)
    }
}
