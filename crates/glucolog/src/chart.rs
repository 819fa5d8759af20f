//! Chart projection of the reading sequence.
//!
//! A chart is a single labeled line series: the x axis carries the time
//! labels in insertion order and the y axis the glucose values. The series
//! can be serialized for an external plotting tool or rendered as a simple
//! text chart for the terminal.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::config::ChartConfig;
use crate::reading::Reading;

/// Label of the glucose series and title of the value axis.
pub const SERIES_LABEL: &str = "Glucose Level (mg/dL)";

/// Title of the time axis.
pub const TIME_AXIS_TITLE: &str = "Time";

/// Widest bar area, in characters, that `render_text` will draw.
pub const MAX_WIDTH: u16 = 200;

/// One point of the series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Time label.
    pub x: String,
    /// Glucose value.
    pub y: f64,
}

/// A labeled line series with a suggested display range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Series label.
    pub label: String,
    /// Title of the x axis.
    pub x_title: String,
    /// Title of the y axis.
    pub y_title: String,
    /// Suggested lower bound of the y axis.
    pub suggested_min: f64,
    /// Suggested upper bound of the y axis.
    pub suggested_max: f64,
    /// Points in insertion order.
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    /// Project readings into a series.
    #[must_use]
    pub fn from_readings(readings: &[Reading], config: &ChartConfig) -> Self {
        Self {
            label: SERIES_LABEL.to_string(),
            x_title: TIME_AXIS_TITLE.to_string(),
            y_title: SERIES_LABEL.to_string(),
            suggested_min: config.suggested_min,
            suggested_max: config.suggested_max,
            points: readings
                .iter()
                .map(|r| ChartPoint {
                    x: r.time.clone(),
                    y: r.glucose,
                })
                .collect(),
        }
    }

    /// Time labels, in order.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.x.as_str()).collect()
    }

    /// Glucose values, in order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    /// Bar length for `value` on a `width`-character scale.
    ///
    /// Values outside the suggested range are clamped to its ends.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn bar_len(&self, value: f64, width: usize) -> usize {
        let span = self.suggested_max - self.suggested_min;
        if span <= 0.0 || width == 0 {
            return 0;
        }
        let fraction = (value.clamp(self.suggested_min, self.suggested_max) - self.suggested_min)
            / span;
        (fraction * width as f64).round() as usize
    }

    /// Render the series as rows of horizontal bars.
    ///
    /// `width` is clamped to [`MAX_WIDTH`].
    #[must_use]
    pub fn render_text(&self, width: usize) -> String {
        let width = width.min(usize::from(MAX_WIDTH));
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} [{} - {}]",
            self.label, self.suggested_min, self.suggested_max
        );

        if self.points.is_empty() {
            out.push_str("(no readings recorded)\n");
            return out;
        }

        let label_width = self
            .points
            .iter()
            .map(|p| p.x.chars().count())
            .max()
            .unwrap_or(0)
            .max(TIME_AXIS_TITLE.len());

        for point in &self.points {
            let bar = "#".repeat(self.bar_len(point.y, width));
            let _ = writeln!(
                out,
                "{:<label_width$} | {:<width$} {}",
                point.x, bar, point.y
            );
        }
        let axis = "-".repeat(width.saturating_add(1));
        let _ = writeln!(out, "{TIME_AXIS_TITLE:<label_width$} +{axis}");
        out
    }
}
