// src/timing/timestamp.rs

const NANOS_PER_SEC: i64 = 1_000_000_000;

/// A point (or span) on one clock, split the way the kernel reports it.
///
/// Both fields are signed so that a difference can be negative if a clock
/// steps backwards between two readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timestamp {
    pub sec: i64,
    pub nsec: i64,
}

impl Timestamp {
    pub const fn new(sec: i64, nsec: i64) -> Self {
        Self { sec, nsec }
    }

    /// `finish - start`, normalized so that `sec` and `nsec` never carry
    /// opposite signs.
    pub fn elapsed(start: Timestamp, finish: Timestamp) -> Timestamp {
        let mut sec = finish.sec - start.sec;
        let mut nsec = finish.nsec - start.nsec;

        if sec > 0 && nsec < 0 {
            nsec += NANOS_PER_SEC;
            sec -= 1;
        } else if sec < 0 && nsec > 0 {
            nsec -= NANOS_PER_SEC;
            sec += 1;
        }

        Timestamp { sec, nsec }
    }

    /// Whole seconds plus the fractional part, as sent on the wire.
    pub fn as_secs_f64(&self) -> f64 {
        self.sec as f64 + self.nsec as f64 / 1e9
    }
}
