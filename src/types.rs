use std::str::FromStr;
use serde::Deserialize;

/// What happens with a finished run.
///
/// - `Collector`: serialize the report and send it to the collector. The probe
///   exits 0 unless something inside the probe itself went wrong; the child's
///   exit code travels inside the packet.
/// - `Local`: no network. The captured output is forwarded to the probe's own
///   stdout/stderr and the probe exits with the child's exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportMode {
    #[default]
    Collector,
    Local,
}

impl FromStr for ReportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "collector" => Ok(ReportMode::Collector),
            "local" => Ok(ReportMode::Local),
            other => Err(format!(
                "invalid report mode: {other} (expected \"collector\" or \"local\")"
            )),
        }
    }
}

/// How child output is collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaptureMode {
    /// One read per pipe after the child has exited. Anything beyond the
    /// buffer, or written after that read, is lost.
    ///
    /// Nothing reads the pipes while the child runs, so a child that writes
    /// more than the OS pipe buffer (64 KiB on Linux) blocks forever and the
    /// probe waits with it. Use `Drain` for commands that may be that chatty.
    #[default]
    SingleRead,
    /// Read both pipes while waiting, keep the first buffer's worth and
    /// discard the rest. A chatty child can never block on a full pipe.
    Drain,
}

impl FromStr for CaptureMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single-read" | "single_read" => Ok(CaptureMode::SingleRead),
            "drain" => Ok(CaptureMode::Drain),
            other => Err(format!(
                "invalid capture mode: {other} (expected \"single-read\" or \"drain\")"
            )),
        }
    }
}

/// Log level as accepted in the config file.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}
