//! The glucose log: the reading sequence, its store and its recommendation.
//!
//! [`Tracker::add`] is the only way to mutate the sequence. Each call
//! validates the input, persists the extended sequence and recomputes the
//! recommendation from the whole sequence before returning.

use tracing::{info, warn};

use crate::analysis::{Analyzer, TrendSummary};
use crate::chart::ChartSeries;
use crate::config::ChartConfig;
use crate::error::Result;
use crate::reading::Reading;
use crate::storage::ReadingStore;

/// In-memory reading sequence backed by a [`ReadingStore`].
pub struct Tracker<S> {
    store: S,
    analyzer: Analyzer,
    readings: Vec<Reading>,
    recommendation: String,
}

impl<S: ReadingStore> Tracker<S> {
    /// Load the persisted sequence and analyze it with default thresholds.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn open(store: S) -> Result<Self> {
        Self::with_analyzer(store, Analyzer::default())
    }

    /// Load the persisted sequence and analyze it with `analyzer`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn with_analyzer(store: S, analyzer: Analyzer) -> Result<Self> {
        let readings = store.load()?;
        let recommendation = analyzer.analyze(&readings);
        info!("Loaded {} readings from {}", readings.len(), store.describe());
        Ok(Self {
            store,
            analyzer,
            readings,
            recommendation,
        })
    }

    /// Validate and append a reading, then persist and re-analyze.
    ///
    /// On any error the in-memory sequence, the persisted state and the
    /// recommendation are left as they were.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidInput`] if the values are rejected, or a
    /// storage error if the extended sequence cannot be persisted.
    pub fn add(&mut self, time: &str, glucose: &str) -> Result<Reading> {
        let reading = Reading::parse(time, glucose).map_err(|e| {
            warn!("Rejected reading (time={:?}, glucose={:?}): {}", time, glucose, e);
            e
        })?;

        let mut next = Vec::with_capacity(self.readings.len() + 1);
        next.extend_from_slice(&self.readings);
        next.push(reading.clone());

        self.store.save(&next)?;
        self.readings = next;
        self.recommendation = self.analyzer.analyze(&self.readings);

        info!("Recorded glucose {} at {}", reading.glucose, reading.time);
        Ok(reading)
    }

    /// All readings in insertion order.
    #[must_use]
    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    /// Number of readings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Check whether no readings have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Advice for the current sequence.
    #[must_use]
    pub fn recommendation(&self) -> &str {
        &self.recommendation
    }

    /// Counts behind the current recommendation, if there are enough readings.
    #[must_use]
    pub fn summary(&self) -> Option<TrendSummary> {
        self.analyzer.summarize(&self.readings)
    }

    /// Chart projection of the current sequence.
    #[must_use]
    pub fn chart(&self, config: &ChartConfig) -> ChartSeries {
        ChartSeries::from_readings(&self.readings, config)
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: ReadingStore> std::fmt::Debug for Tracker<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracker")
            .field("store", &self.store.describe())
            .field("analyzer", &self.analyzer)
            .field("readings", &self.readings.len())
            .field("recommendation", &self.recommendation)
            .finish()
    }
}
