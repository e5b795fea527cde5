// tests/config_loading.rs

use std::io::Write;

use tempfile::NamedTempFile;

use execprobe::config::loader::{CONFIG_ENV, HOST_ENV, MODE_ENV, PORT_ENV};
use execprobe::config::{load_from_path, load_with, ProbeConfig, RawProbeConfig};
use execprobe::errors::{ProbeError, Result};
use execprobe::types::{CaptureMode, LogLevel, ReportMode};
use execprobe::wire::{WireTags, DEFAULT_MAX_PACKET_LEN};

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

fn load_env(vars: &[(&str, String)]) -> Result<ProbeConfig> {
    let vars: Vec<(String, String)> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    load_with(move |key| {
        vars.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
}

#[test]
fn defaults_without_any_configuration() {
    let cfg = load_env(&[]).unwrap();

    assert_eq!(cfg.collector.host, "localhost");
    assert_eq!(cfg.collector.port, 8081);
    assert_eq!(cfg.retry.max_attempts, 3);
    assert_eq!(cfg.retry.delay_ms, 50);
    assert_eq!(cfg.report.mode, ReportMode::Collector);
    assert_eq!(cfg.capture.mode, CaptureMode::SingleRead);
    assert_eq!(cfg.wire.tags, WireTags::v1());
    assert_eq!(cfg.wire.max_packet_len, DEFAULT_MAX_PACKET_LEN);
    assert_eq!(cfg.log.level, None);
}

#[test]
fn file_values_and_partial_tag_overrides() {
    let file = config_file(
        r#"
[collector]
host = "collector.internal"
port = 9000

[retry]
max_attempts = 5
delay_ms = 10

[capture]
mode = "drain"

[wire]
exit = "[[exit]]"
max_packet_len = 20000

[log]
level = "debug"
"#,
    );

    let path = file.path().to_string_lossy().into_owned();
    let cfg = load_env(&[(CONFIG_ENV, path)]).unwrap();

    assert_eq!(cfg.collector.host, "collector.internal");
    assert_eq!(cfg.collector.port, 9000);
    assert_eq!(cfg.retry.max_attempts, 5);
    assert_eq!(cfg.retry.delay_ms, 10);
    assert_eq!(cfg.capture.mode, CaptureMode::Drain);
    assert_eq!(cfg.wire.tags.exit, "[[exit]]");
    assert_eq!(cfg.wire.tags.command, "[#cmd#]");
    assert_eq!(cfg.wire.max_packet_len, 20000);
    assert_eq!(cfg.log.level, Some(LogLevel::Debug));
}

#[test]
fn environment_beats_the_file() {
    let file = config_file(
        r#"
[collector]
host = "from-file"
port = 9000

[report]
mode = "collector"
"#,
    );

    let cfg = load_env(&[
        (CONFIG_ENV, file.path().to_string_lossy().into_owned()),
        (HOST_ENV, "127.0.0.1".to_string()),
        (PORT_ENV, " 9100 ".to_string()),
        (MODE_ENV, "LOCAL".to_string()),
    ])
    .unwrap();

    assert_eq!(cfg.collector.host, "127.0.0.1");
    assert_eq!(cfg.collector.port, 9100);
    assert_eq!(cfg.report.mode, ReportMode::Local);
}

#[test]
fn invalid_port_override_is_a_config_error() {
    match load_env(&[(PORT_ENV, "eighty".to_string())]) {
        Err(ProbeError::ConfigError(msg)) => assert!(msg.contains(PORT_ENV)),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn unknown_mode_is_a_config_error() {
    match load_env(&[(MODE_ENV, "carrier-pigeon".to_string())]) {
        Err(ProbeError::ConfigError(msg)) => assert!(msg.contains("carrier-pigeon")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn duplicate_tags_are_rejected() {
    let mut raw = RawProbeConfig::default();
    raw.wire.tags.stderr = raw.wire.tags.stdout.clone();

    match ProbeConfig::try_from(raw) {
        Err(ProbeError::ConfigError(msg)) => assert!(msg.contains("more than one section")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn zero_attempts_and_zero_port_are_rejected() {
    let mut raw = RawProbeConfig::default();
    raw.retry.max_attempts = 0;
    assert!(matches!(
        ProbeConfig::try_from(raw),
        Err(ProbeError::ConfigError(_))
    ));

    let mut raw = RawProbeConfig::default();
    raw.collector.port = 0;
    assert!(matches!(
        ProbeConfig::try_from(raw),
        Err(ProbeError::ConfigError(_))
    ));
}

#[test]
fn packet_cap_must_hold_the_tags() {
    let mut raw = RawProbeConfig::default();
    raw.wire.max_packet_len = 10;

    match ProbeConfig::try_from(raw) {
        Err(ProbeError::ConfigError(msg)) => assert!(msg.contains("max_packet_len")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn malformed_toml_is_a_toml_error() {
    let file = config_file("[collector\nport = ");
    assert!(matches!(
        load_from_path(file.path()),
        Err(ProbeError::TomlError(_))
    ));
}
