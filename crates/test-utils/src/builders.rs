#![allow(dead_code)]

use execprobe::exec::{CapturedOutput, StreamCapture};
use execprobe::report::{Report, ReportBuilder};
use execprobe::timing::{TimeReport, TimeSample, Timestamp};

/// Captured output from two byte strings.
pub fn output(stdout: &[u8], stderr: &[u8]) -> CapturedOutput {
    CapturedOutput {
        stdout: StreamCapture::from_bytes(stdout),
        stderr: StreamCapture::from_bytes(stderr),
    }
}

/// A sample from `(sec, nsec)` pairs for the CPU and wall clocks.
pub fn sample(cpu: (i64, i64), wall: (i64, i64)) -> TimeSample {
    TimeSample {
        cpu: Timestamp::new(cpu.0, cpu.1),
        wall: Timestamp::new(wall.0, wall.1),
    }
}

/// Deterministic timings: CPU 0.001 -> 0.0035, wall 1700000000.25 -> 1700000001.75.
pub fn fixed_times() -> TimeReport {
    TimeReport::new(
        sample((0, 1_000_000), (1_700_000_000, 250_000_000)),
        sample((0, 3_500_000), (1_700_000_001, 750_000_000)),
    )
}

/// Builder pre-filled with fixed timings and empty output.
pub fn report_for(command: &[&str]) -> ReportBuilder {
    ReportBuilder::new(command.iter().copied()).times(fixed_times())
}

pub fn simple_report(command: &[&str], exit_code: i32, stdout: &[u8], stderr: &[u8]) -> Report {
    report_for(command)
        .exit_code(exit_code)
        .output(output(stdout, stderr))
        .build()
}
