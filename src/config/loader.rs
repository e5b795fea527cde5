// src/config/loader.rs

use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::config::model::{ProbeConfig, RawProbeConfig};
use crate::errors::{ProbeError, Result};
use crate::types::{CaptureMode, ReportMode};

/// Path of an optional TOML config file.
pub const CONFIG_ENV: &str = "EXECPROBE_CONFIG";
/// Overrides `[collector] host`.
pub const HOST_ENV: &str = "EXECPROBE_HOST";
/// Overrides `[collector] port`.
pub const PORT_ENV: &str = "EXECPROBE_PORT";
/// Overrides `[report] mode`.
pub const MODE_ENV: &str = "EXECPROBE_MODE";
/// Overrides `[capture] mode`.
pub const CAPTURE_ENV: &str = "EXECPROBE_CAPTURE";

/// Load a configuration file from a given path and return the raw
/// `RawProbeConfig`.
///
/// This only performs TOML deserialization; use [`load_with`] for the full
/// defaults -> file -> environment -> validation chain.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawProbeConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let config: RawProbeConfig = toml::from_str(&contents)?;
    Ok(config)
}

/// Load configuration from the process environment.
pub fn load_from_env() -> Result<ProbeConfig> {
    load_with(|key| std::env::var(key).ok())
}

/// Load configuration using `lookup` as the environment.
///
/// - Starts from built-in defaults, or the file named by `EXECPROBE_CONFIG`.
/// - Applies `EXECPROBE_HOST`, `EXECPROBE_PORT`, `EXECPROBE_MODE` and
///   `EXECPROBE_CAPTURE` on top.
/// - Validates the result.
pub fn load_with<F>(lookup: F) -> Result<ProbeConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut raw = match non_empty(lookup(CONFIG_ENV)) {
        Some(path) => {
            debug!(%path, "loading config file");
            load_from_path(&path)?
        }
        None => RawProbeConfig::default(),
    };

    apply_env_overrides(&mut raw, &lookup)?;
    ProbeConfig::try_from(raw)
}

fn apply_env_overrides<F>(raw: &mut RawProbeConfig, lookup: &F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = non_empty(lookup(HOST_ENV)) {
        raw.collector.host = host;
    }

    if let Some(port) = non_empty(lookup(PORT_ENV)) {
        raw.collector.port = port.trim().parse().map_err(|e| {
            ProbeError::ConfigError(format!("{PORT_ENV}={port:?} is not a valid port: {e}"))
        })?;
    }

    if let Some(mode) = non_empty(lookup(MODE_ENV)) {
        raw.report.mode = ReportMode::from_str(&mode).map_err(ProbeError::ConfigError)?;
    }

    if let Some(mode) = non_empty(lookup(CAPTURE_ENV)) {
        raw.capture.mode = CaptureMode::from_str(&mode).map_err(ProbeError::ConfigError)?;
    }

    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
