// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! The probe has no flags of its own: every argument, hyphenated or not,
//! belongs to the wrapped command. Configuration comes from the environment
//! (see [`crate::config::loader`]).

use std::ffi::OsString;

use clap::Parser;

/// Command-line arguments for `execprobe`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "execprobe",
    about = "Run a command, capture its output and timings, and report them to a collector.",
    long_about = None,
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct CliArgs {
    /// The command to run, followed by its arguments.
    #[arg(
        value_name = "COMMAND",
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<OsString>,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
