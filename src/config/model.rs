// src/config/model.rs

use serde::Deserialize;

use crate::transport::retry::{DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY};
use crate::types::{CaptureMode, LogLevel, ReportMode};
use crate::wire::{WireTags, DEFAULT_MAX_PACKET_LEN};

/// Configuration as read from a TOML file.
///
/// ```toml
/// [collector]
/// host = "localhost"
/// port = 8081
///
/// [retry]
/// max_attempts = 3
/// delay_ms = 50
///
/// [report]
/// mode = "collector"
///
/// [capture]
/// mode = "single-read"
///
/// [wire]
/// exit = "[#exit#]"
/// max_packet_len = 9580
///
/// [log]
/// level = "warn"
/// ```
///
/// All sections are optional and have the defaults shown above.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProbeConfig {
    #[serde(default)]
    pub collector: CollectorSection,
    #[serde(default)]
    pub retry: RetrySection,
    #[serde(default)]
    pub report: ReportSection,
    #[serde(default)]
    pub capture: CaptureSection,
    #[serde(default)]
    pub wire: WireSection,
    #[serde(default)]
    pub log: LogSection,
}

/// Validated configuration. Only obtainable through
/// `ProbeConfig::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub collector: CollectorSection,
    pub retry: RetrySection,
    pub report: ReportSection,
    pub capture: CaptureSection,
    pub wire: WireSection,
    pub log: LogSection,
}

impl ProbeConfig {
    pub(crate) fn new_unchecked(raw: RawProbeConfig) -> Self {
        Self {
            collector: raw.collector,
            retry: raw.retry,
            report: raw.report,
            capture: raw.capture,
            wire: raw.wire,
            log: raw.log,
        }
    }
}

/// `[collector]` section: where reports go.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectorSection {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Upper bound for a single connect attempt.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    8081
}

fn default_connect_timeout_ms() -> u64 {
    2000
}

impl Default for CollectorSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

/// `[retry]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RetrySection {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_delay_ms() -> u64 {
    DEFAULT_RETRY_DELAY.as_millis() as u64
}

impl Default for RetrySection {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_ms: default_delay_ms(),
        }
    }
}

/// `[report]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportSection {
    #[serde(default)]
    pub mode: ReportMode,
}

/// `[capture]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaptureSection {
    #[serde(default)]
    pub mode: CaptureMode,
}

/// `[wire]` section: tag literals (flattened) plus the packet cap.
#[derive(Debug, Clone, Deserialize)]
pub struct WireSection {
    #[serde(flatten)]
    pub tags: WireTags,

    #[serde(default = "default_max_packet_len")]
    pub max_packet_len: usize,
}

fn default_max_packet_len() -> usize {
    DEFAULT_MAX_PACKET_LEN
}

impl Default for WireSection {
    fn default() -> Self {
        Self {
            tags: WireTags::default(),
            max_packet_len: default_max_packet_len(),
        }
    }
}

/// `[log]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogSection {
    #[serde(default)]
    pub level: Option<LogLevel>,
}
