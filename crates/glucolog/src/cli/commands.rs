//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::chart::MAX_WIDTH;

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Glucose level in mg/dL
    #[arg(allow_negative_numbers = true)]
    pub glucose: String,

    /// Time label for the reading (defaults to the current time, HH:MM)
    #[arg(short, long)]
    pub time: Option<String>,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Chart command arguments.
#[derive(Debug, Args)]
pub struct ChartCommand {
    /// Width of the bar area in characters (overrides configuration)
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..=i64::from(MAX_WIDTH)))]
    pub width: Option<u16>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: ChartFormat,
}

/// Analyze command arguments.
#[derive(Debug, Args)]
pub struct AnalyzeCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for the reading list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

/// Output format for the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ChartFormat {
    /// Text bars for the terminal
    #[default]
    Plain,
    /// JSON series for external plotting
    Json,
}
