//! `glucolog` - CLI for the glucose log
//!
//! This binary provides the command-line interface for recording readings,
//! listing and charting them, and showing trend advice.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;

use glucolog::cli::{
    add_error, validate_config_file, AddCommand, AnalyzeCommand, ChartCommand, ChartFormat, Cli,
    Command, ConfigCommand, ListCommand, OutputFormat, StatusCommand,
};
use glucolog::{init_logging, open_store, Analyzer, Config, ReadingStore, Tracker};

type Log = Tracker<Box<dyn ReadingStore>>;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;

    match cli.command {
        Command::Add(cmd) => handle_add(&config, cmd),
        Command::List(cmd) => handle_list(&config, &cmd),
        Command::Chart(cmd) => handle_chart(&config, &cmd),
        Command::Analyze(cmd) => handle_analyze(&config, &cmd),
        Command::Status(cmd) => handle_status(&config, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_log(config: &Config) -> anyhow::Result<Log> {
    let store = open_store(config).with_context(|| {
        format!(
            "failed to open {} store at {}",
            config.storage.backend,
            config.storage_path().display()
        )
    })?;
    let tracker = Tracker::with_analyzer(store, Analyzer::new(config.thresholds()))?;
    Ok(tracker)
}

fn handle_add(config: &Config, cmd: AddCommand) -> anyhow::Result<()> {
    let mut log = open_log(config)?;
    let time = cmd
        .time
        .unwrap_or_else(|| chrono::Local::now().format("%H:%M").to_string());

    let reading = log.add(&time, &cmd.glucose).map_err(add_error)?;
    println!("Recorded {reading}");

    println!();
    println!("{}", log.recommendation());
    Ok(())
}

fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let log = open_log(config)?;

    match cmd.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(log.readings())?);
        }
        OutputFormat::Plain => {
            if log.is_empty() {
                println!("No readings recorded.");
            }
            for reading in log.readings() {
                println!("{reading}");
            }
        }
        OutputFormat::Table => {
            let time_width = log
                .readings()
                .iter()
                .map(|r| r.time.chars().count())
                .max()
                .unwrap_or(0)
                .max("Time".len());
            println!("{:>4}  {:<time_width$}  {:>8}", "#", "Time", "mg/dL");
            println!("{:->4}  {:-<time_width$}  {:->8}", "", "", "");
            for (i, reading) in log.readings().iter().enumerate() {
                println!(
                    "{:>4}  {:<time_width$}  {:>8}",
                    i + 1,
                    reading.time,
                    reading.glucose
                );
            }
        }
    }
    Ok(())
}

fn handle_chart(config: &Config, cmd: &ChartCommand) -> anyhow::Result<()> {
    let log = open_log(config)?;
    let series = log.chart(&config.chart);

    match cmd.format {
        ChartFormat::Json => println!("{}", serde_json::to_string_pretty(&series)?),
        ChartFormat::Plain => {
            let width = cmd.width.map_or(config.chart.width, usize::from);
            print!("{}", series.render_text(width));
        }
    }
    Ok(())
}

fn handle_analyze(config: &Config, cmd: &AnalyzeCommand) -> anyhow::Result<()> {
    let log = open_log(config)?;

    if cmd.json {
        let report = serde_json::json!({
            "readings": log.len(),
            "summary": log.summary(),
            "recommendation": log.recommendation(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", log.recommendation());
    }
    Ok(())
}

fn handle_status(config: &Config, cmd: &StatusCommand) -> anyhow::Result<()> {
    let log = open_log(config)?;
    let last = log.readings().last();

    if cmd.json {
        let status = serde_json::json!({
            "backend": config.storage.backend,
            "storage_path": config.storage_path(),
            "storage_key": config.storage.key,
            "readings": log.len(),
            "last_reading": last,
            "recommendation": log.recommendation(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("glucolog status");
        println!("---------------");
        println!("Backend:        {}", config.storage.backend);
        println!("Storage:        {}", log.store().describe());
        println!("Readings:       {}", log.len());
        match last {
            Some(reading) => println!("Last reading:   {reading}"),
            None => println!("Last reading:   none"),
        }
        println!();
        println!("{}", log.recommendation());
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Backend:            {}", config.storage.backend);
                println!("  Database path:      {}", config.database_path().display());
                println!("  JSON path:          {}", config.json_path().display());
                println!("  Key:                {}", config.storage.key);
                println!();
                println!("[Analysis]");
                println!("  High threshold:     {}", config.analysis.high_threshold);
                println!("  Low threshold:      {}", config.analysis.low_threshold);
                println!("  Spike delta:        {}", config.analysis.spike_delta);
                println!();
                println!("[Chart]");
                println!(
                    "  Suggested range:    {} - {}",
                    config.chart.suggested_min, config.chart.suggested_max
                );
                println!("  Width:              {}", config.chart.width);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            validate_config_file(&path)?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
