//! Configuration management for glucolog.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::analysis::Thresholds;
use crate::chart::MAX_WIDTH;
use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "glucolog";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "readings.db";

/// Default JSON file name.
const JSON_FILE_NAME: &str = "readings.json";

/// Default key the reading sequence is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "diabetesData";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `GLUCOLOG_`, sections separated by `__`)
/// 2. TOML config file at `~/.config/glucolog/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Trend analysis configuration.
    pub analysis: AnalysisConfig,
    /// Chart configuration.
    pub chart: ChartConfig,
}

/// Which persistence backend holds the reading sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// A key-value table in an `SQLite` database.
    #[default]
    Sqlite,
    /// A single JSON file.
    Json,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite => write!(f, "sqlite"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Persistence backend.
    pub backend: StorageBackend,
    /// Path to the database file.
    /// Defaults to `~/.local/share/glucolog/readings.db`
    pub database_path: Option<PathBuf>,
    /// Path to the JSON file used by the `json` backend.
    /// Defaults to `~/.local/share/glucolog/readings.json`
    pub json_path: Option<PathBuf>,
    /// Key the serialized sequence is stored under.
    pub key: String,
}

/// Trend analysis thresholds, in mg/dL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Readings above this are reported as high.
    pub high_threshold: f64,
    /// Readings below this are reported as low.
    pub low_threshold: f64,
    /// Changes between adjacent readings above this are reported as spikes.
    pub spike_delta: f64,
}

/// Chart rendering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Lower bound of the suggested value axis.
    pub suggested_min: f64,
    /// Upper bound of the suggested value axis.
    pub suggested_max: f64,
    /// Width of the text chart's bar area in characters.
    pub width: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            database_path: None, // Will be resolved to default at runtime
            json_path: None,
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        let thresholds = Thresholds::default();
        Self {
            high_threshold: thresholds.high,
            low_threshold: thresholds.low,
            spike_delta: thresholds.spike_delta,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            suggested_min: 50.0,
            suggested_max: 300.0,
            width: 40,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `GLUCOLOG_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("GLUCOLOG_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.storage.key.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "storage key must not be empty".to_string(),
            });
        }

        let analysis = &self.analysis;
        let thresholds = [
            ("high_threshold", analysis.high_threshold),
            ("low_threshold", analysis.low_threshold),
            ("spike_delta", analysis.spike_delta),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() {
                return Err(Error::ConfigValidation {
                    message: format!("{name} must be a finite number"),
                });
            }
        }

        if analysis.low_threshold >= analysis.high_threshold {
            return Err(Error::ConfigValidation {
                message: format!(
                    "low_threshold ({}) must be below high_threshold ({})",
                    analysis.low_threshold, analysis.high_threshold
                ),
            });
        }

        if analysis.spike_delta <= 0.0 {
            return Err(Error::ConfigValidation {
                message: "spike_delta must be greater than 0".to_string(),
            });
        }

        let chart = &self.chart;
        if !(chart.suggested_min.is_finite() && chart.suggested_max.is_finite())
            || chart.suggested_min >= chart.suggested_max
        {
            return Err(Error::ConfigValidation {
                message: format!(
                    "suggested_min ({}) must be below suggested_max ({})",
                    chart.suggested_min, chart.suggested_max
                ),
            });
        }

        if chart.width == 0 || chart.width > usize::from(MAX_WIDTH) {
            return Err(Error::ConfigValidation {
                message: format!(
                    "chart width ({}) must be between 1 and {MAX_WIDTH}",
                    chart.width
                ),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Get the JSON file path, resolving defaults if not set.
    #[must_use]
    pub fn json_path(&self) -> PathBuf {
        self.storage
            .json_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(JSON_FILE_NAME))
    }

    /// Get the path of whichever backend is active.
    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        match self.storage.backend {
            StorageBackend::Sqlite => self.database_path(),
            StorageBackend::Json => self.json_path(),
        }
    }

    /// Get the analysis thresholds.
    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            high: self.analysis.high_threshold,
            low: self.analysis.low_threshold,
            spike_delta: self.analysis.spike_delta,
        }
    }
}
