//! `glucolog` - A personal glucose log with trend advice
//!
//! This library provides the reading model, the trend analyzer, persistent
//! storage for the reading sequence and a chart projection of it.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod chart;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod reading;
pub mod storage;
pub mod tracker;

pub use analysis::{analyze, Analyzer, Thresholds, TrendSummary};
pub use chart::ChartSeries;
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use reading::Reading;
pub use storage::{open_store, JsonFileStore, ReadingStore, SqliteStore};
pub use tracker::Tracker;
