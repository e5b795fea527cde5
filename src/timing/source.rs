// src/timing/source.rs

use nix::time::{clock_gettime, ClockId};
use tracing::warn;

use super::timestamp::Timestamp;

/// Process-CPU and wall-clock readings taken at the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeSample {
    pub cpu: Timestamp,
    pub wall: Timestamp,
}

impl TimeSample {
    /// Per-clock `finish - start`.
    pub fn elapsed(start: TimeSample, finish: TimeSample) -> TimeSample {
        TimeSample {
            cpu: Timestamp::elapsed(start.cpu, finish.cpu),
            wall: Timestamp::elapsed(start.wall, finish.wall),
        }
    }
}

/// Start, finish and derived elapsed samples for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeReport {
    pub start: TimeSample,
    pub finish: TimeSample,
    pub elapsed: TimeSample,
}

impl TimeReport {
    pub fn new(start: TimeSample, finish: TimeSample) -> Self {
        Self {
            start,
            finish,
            elapsed: TimeSample::elapsed(start, finish),
        }
    }
}

/// Where timestamps come from.
///
/// Production code uses [`SystemTimeSource`]; tests can hand the runner a
/// source that returns fixed samples.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> TimeSample;
}

/// Reads `CLOCK_PROCESS_CPUTIME_ID` and `CLOCK_REALTIME`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> TimeSample {
        TimeSample {
            cpu: read_clock(ClockId::CLOCK_PROCESS_CPUTIME_ID),
            wall: read_clock(ClockId::CLOCK_REALTIME),
        }
    }
}

fn read_clock(clock: ClockId) -> Timestamp {
    match clock_gettime(clock) {
        Ok(ts) => Timestamp::new(ts.tv_sec() as i64, ts.tv_nsec() as i64),
        Err(e) => {
            warn!(?clock, error = %e, "clock_gettime failed; recording zero");
            Timestamp::default()
        }
    }
}
