// src/config/validate.rs

use std::collections::HashSet;

use crate::config::model::{ProbeConfig, RawProbeConfig};
use crate::errors::{ProbeError, Result};

impl TryFrom<RawProbeConfig> for ProbeConfig {
    type Error = ProbeError;

    fn try_from(raw: RawProbeConfig) -> std::result::Result<Self, Self::Error> {
        validate_config(&raw)?;
        Ok(ProbeConfig::new_unchecked(raw))
    }
}

/// Check a raw config without converting it.
pub fn validate_config(cfg: &RawProbeConfig) -> Result<()> {
    validate_collector(cfg)?;
    validate_retry(cfg)?;
    validate_wire(cfg)?;
    Ok(())
}

fn validate_collector(cfg: &RawProbeConfig) -> Result<()> {
    if cfg.collector.host.trim().is_empty() {
        return Err(ProbeError::ConfigError(
            "[collector].host must not be empty".to_string(),
        ));
    }

    if cfg.collector.port == 0 {
        return Err(ProbeError::ConfigError(
            "[collector].port must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}

fn validate_retry(cfg: &RawProbeConfig) -> Result<()> {
    if cfg.retry.max_attempts == 0 {
        return Err(ProbeError::ConfigError(
            "[retry].max_attempts must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_wire(cfg: &RawProbeConfig) -> Result<()> {
    let tags = &cfg.wire.tags;
    let names = ["exit", "command", "stdout", "stderr", "timings"];

    let mut seen = HashSet::new();
    for (name, tag) in names.iter().zip(tags.in_order()) {
        if tag.is_empty() {
            return Err(ProbeError::ConfigError(format!(
                "[wire].{name} tag must not be empty"
            )));
        }
        if !seen.insert(tag) {
            return Err(ProbeError::ConfigError(format!(
                "[wire].{name} tag {tag:?} is used by more than one section"
            )));
        }
    }

    let minimum = tags.overhead() + 1;
    if cfg.wire.max_packet_len < minimum {
        return Err(ProbeError::ConfigError(format!(
            "[wire].max_packet_len must be >= {minimum} to hold the tags (got {})",
            cfg.wire.max_packet_len
        )));
    }

    Ok(())
}
