//! Core reading types for glucolog.
//!
//! This module defines the glucose reading record and the validation applied
//! to user-submitted values before they are appended to the log.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single glucose measurement.
///
/// The time label is free-form text (typically `HH:MM`) and is never checked
/// for chronological order; the log treats insertion order as time order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// When the reading was taken, as entered by the user.
    pub time: String,

    /// Glucose level in mg/dL.
    pub glucose: f64,
}

impl Reading {
    /// Create a reading without validating it.
    #[must_use]
    pub fn new(time: impl Into<String>, glucose: f64) -> Self {
        Self {
            time: time.into(),
            glucose,
        }
    }

    /// Build a reading from raw user input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when the time label is blank, the
    /// glucose value is blank or not a finite number, or the glucose value
    /// is not strictly positive.
    pub fn parse(time: &str, glucose: &str) -> Result<Self> {
        let time = time.trim();
        if time.is_empty() {
            return Err(Error::invalid_input("time is empty"));
        }

        let glucose = glucose.trim();
        if glucose.is_empty() {
            return Err(Error::invalid_input("glucose level is empty"));
        }

        let not_a_number =
            || Error::invalid_input(format!("glucose level is not a number: {glucose}"));
        let value: f64 = glucose.parse().map_err(|_| not_a_number())?;
        if !value.is_finite() {
            return Err(not_a_number());
        }

        if value <= 0.0 {
            return Err(Error::invalid_input(format!(
                "glucose level must be greater than 0, got {value}"
            )));
        }

        Ok(Self::new(time, value))
    }

    /// Absolute change from `previous` to this reading.
    #[must_use]
    pub fn delta_from(&self, previous: &Self) -> f64 {
        (self.glucose - previous.glucose).abs()
    }
}

impl std::fmt::Display for Reading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Time: {}, Glucose: {} mg/dL", self.time, self.glucose)
    }
}
