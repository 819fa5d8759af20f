//! Trend analysis over a sequence of glucose readings.
//!
//! The analyzer walks adjacent pairs of readings in insertion order and
//! counts high readings, low readings and spikes. The counts are turned into
//! a short piece of advice. Only the second reading of each pair is checked
//! against the high/low thresholds; the first reading of the sequence serves
//! solely as the baseline for the first spike check.
//!
//! # Example
//!
//! ```
//! use glucolog::analysis::analyze;
//! use glucolog::Reading;
//!
//! let readings = vec![Reading::new("08:00", 100.0), Reading::new("10:00", 190.0)];
//! assert_eq!(
//!     analyze(&readings),
//!     "Detected 1 high glucose readings. Adjust meals or timing. \
//!      Detected 1 glucose spikes. Monitor potential triggers."
//! );
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::reading::Reading;

/// Returned when there are fewer than two readings to compare.
pub const NOT_ENOUGH_DATA: &str = "Add more data to analyze trends.";

/// Returned when no high, low or spike was detected.
pub const STABLE: &str = "Glucose levels are stable. Keep monitoring.";

/// Minimum number of readings needed before any pair can be compared.
pub const MIN_READINGS: usize = 2;

/// Thresholds used to classify readings, in mg/dL.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Readings strictly above this are high.
    pub high: f64,
    /// Readings strictly below this are low.
    pub low: f64,
    /// Adjacent changes strictly larger than this are spikes.
    pub spike_delta: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            high: 180.0,
            low: 70.0,
            spike_delta: 50.0,
        }
    }
}

/// Counts gathered from one pass over a reading sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendSummary {
    /// Number of high readings.
    pub high_count: usize,
    /// Number of low readings.
    pub low_count: usize,
    /// Number of spikes between adjacent readings.
    pub spike_count: usize,
}

impl TrendSummary {
    /// Check whether nothing noteworthy was detected.
    #[must_use]
    pub fn is_stable(&self) -> bool {
        self.high_count == 0 && self.low_count == 0 && self.spike_count == 0
    }

    /// Advice clauses in priority order: high, low, spikes.
    #[must_use]
    pub fn advice(&self) -> Vec<String> {
        let mut advice = Vec::new();
        if self.high_count > 0 {
            advice.push(format!(
                "Detected {} high glucose readings. Adjust meals or timing.",
                self.high_count
            ));
        }
        if self.low_count > 0 {
            advice.push(format!(
                "Detected {} low glucose readings. Ensure enough carbs.",
                self.low_count
            ));
        }
        if self.spike_count > 0 {
            advice.push(format!(
                "Detected {} glucose spikes. Monitor potential triggers.",
                self.spike_count
            ));
        }
        if advice.is_empty() {
            advice.push(STABLE.to_string());
        }
        advice
    }

    /// The advice clauses joined into a single recommendation.
    #[must_use]
    pub fn recommendation(&self) -> String {
        self.advice().join(" ")
    }
}

/// Trend analyzer with configurable thresholds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Analyzer {
    thresholds: Thresholds,
}

impl Analyzer {
    /// Create an analyzer using the given thresholds.
    #[must_use]
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// The thresholds this analyzer classifies against.
    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Count highs, lows and spikes across adjacent pairs.
    ///
    /// Returns `None` when there are fewer than [`MIN_READINGS`] readings.
    #[must_use]
    pub fn summarize(&self, readings: &[Reading]) -> Option<TrendSummary> {
        if readings.len() < MIN_READINGS {
            return None;
        }

        let Thresholds {
            high,
            low,
            spike_delta,
        } = self.thresholds;

        let mut summary = TrendSummary::default();
        for pair in readings.windows(2) {
            let (previous, current) = (&pair[0], &pair[1]);

            if current.glucose > high {
                summary.high_count += 1;
            }
            if current.glucose < low {
                summary.low_count += 1;
            }
            if current.delta_from(previous) > spike_delta {
                summary.spike_count += 1;
            }
        }

        debug!(
            readings = readings.len(),
            high = summary.high_count,
            low = summary.low_count,
            spikes = summary.spike_count,
            "Analyzed glucose trends"
        );
        Some(summary)
    }

    /// Produce the recommendation text for the full sequence.
    #[must_use]
    pub fn analyze(&self, readings: &[Reading]) -> String {
        self.summarize(readings)
            .map_or_else(|| NOT_ENOUGH_DATA.to_string(), |s| s.recommendation())
    }
}

/// Analyze readings with the default thresholds (180 / 70 / 50 mg/dL).
#[must_use]
pub fn analyze(readings: &[Reading]) -> String {
    Analyzer::default().analyze(readings)
}
