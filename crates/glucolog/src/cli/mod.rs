//! Command-line interface for glucolog.
//!
//! This module provides the CLI structure for the `glucolog` binary.

mod commands;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, AnalyzeCommand, ChartCommand, ChartFormat, ConfigCommand, ListCommand,
    OutputFormat, StatusCommand,
};

use crate::config::Config;
use crate::error::Error;
use crate::logging::Verbosity;

/// Shown when a reading is rejected.
pub const INVALID_INPUT_MESSAGE: &str = "Please enter a valid time and glucose level.";

/// glucolog - Log glucose readings and spot trends
///
/// Records glucose readings with time labels, keeps them on disk, charts
/// them and gives simple advice based on highs, lows and spikes.
#[derive(Debug, Parser)]
#[command(name = "glucolog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a new glucose reading
    Add(AddCommand),

    /// List recorded readings
    List(ListCommand),

    /// Chart recorded readings
    Chart(ChartCommand),

    /// Show the current recommendation
    Analyze(AnalyzeCommand),

    /// Show storage and log status
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

/// Wrap an error from adding a reading with the message shown to the user.
///
/// Rejected input is reported with [`INVALID_INPUT_MESSAGE`]; anything else
/// is a storage failure.
#[must_use]
pub fn add_error(err: Error) -> anyhow::Error {
    let context = if err.is_invalid_input() {
        INVALID_INPUT_MESSAGE
    } else {
        "failed to save reading"
    };
    anyhow::Error::new(err).context(context)
}

/// Load and validate a configuration file.
///
/// # Errors
///
/// Returns an error naming the file if it cannot be parsed or fails
/// validation.
pub fn validate_config_file(path: &Path) -> anyhow::Result<Config> {
    Config::load_from(Some(path.to_path_buf()))
        .with_context(|| format!("invalid configuration file {}", path.display()))
}
