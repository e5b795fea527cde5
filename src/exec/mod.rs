// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running the wrapped command with
//! `tokio::process::Command` and turning what happened into an
//! [`Execution`].
//!
//! - [`runner`] spawns the child with piped stdout/stderr, waits for it, takes
//!   the start/finish timestamps and classifies the outcome.
//! - [`capture`] implements the bounded output capture (single read by
//!   default, full drain on request).
//! - [`signals`] turns signal numbers into the names used in diagnostics.

pub mod capture;
pub mod runner;
pub mod signals;

pub use capture::{CapturedOutput, StreamCapture, CAPTURE_CAPACITY};
pub use runner::{ChildHandle, ChildOutcome, Execution, ProcessRunner};
