// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `flowdag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "flowdag",
    version,
    about = "Run a multi-phase workflow of dependent tasks, resuming from persisted state.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the workflow definition (TOML).
    ///
    /// Default: `Workflow.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Workflow.toml")]
    pub workflow: String,

    /// Override the execution-state file location.
    ///
    /// If omitted, the state is kept next to the definition as
    /// `<stem>.state.json`.
    #[arg(long, value_name = "PATH")]
    pub state: Option<String>,

    /// Delete any persisted execution state before running, forcing a clean
    /// restart instead of a resume.
    #[arg(long)]
    pub fresh: bool,

    /// Maximum attempts per failing task within this run.
    ///
    /// If omitted, failing tasks are re-attempted for as long as the rest of
    /// the workflow keeps making progress.
    #[arg(long, value_name = "N")]
    pub max_attempts: Option<u32>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `FLOWDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the phases and tasks, but don't execute.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
