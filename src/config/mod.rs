// src/config/mod.rs

//! Configuration loading and validation for execprobe.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file and environment overrides (`loader.rs`).
//! - Validate basic invariants like tag distinctness (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_from_env, load_from_path, load_with};
pub use model::{
    CaptureSection, CollectorSection, LogSection, ProbeConfig, RawProbeConfig, ReportSection,
    RetrySection, WireSection,
};
pub use validate::validate_config;
