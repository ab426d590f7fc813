//! Serializable train descriptions used by configs and presets.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::StatsError;
use crate::ratio::EngineCounts;
use crate::stats::{StatsCalculator, StatsResult};

/// An engine mix plus the number of cars it pulls.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrainConfig {
    #[serde(default)]
    pub engines: EngineCounts,
    #[serde(default)]
    pub cars: u32,
}

#[derive(Debug, Error)]
pub enum TrainConfigError {
    #[error("failed to parse train config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown preset `{0}`")]
    UnknownPreset(String),
}

impl TrainConfig {
    #[must_use]
    pub const fn new(engines: EngineCounts, cars: u32) -> Self {
        Self { engines, cars }
    }

    /// Load a train config from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into a train config.
    pub fn from_json(json: &str) -> Result<Self, TrainConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Compute stats with the stock catalog and acceleration table.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::InputTooLarge`] when a ratio-reduced count exceeds
    /// the expansion ceiling.
    pub fn stats(&self) -> Result<StatsResult, StatsError> {
        self.stats_with(&StatsCalculator::standard())
    }

    /// Compute stats with an explicit calculator.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::InputTooLarge`] when a ratio-reduced count exceeds
    /// the expansion ceiling.
    pub fn stats_with(&self, calculator: &StatsCalculator<'_>) -> Result<StatsResult, StatsError> {
        calculator.compute(&self.engines, self.cars)
    }
}
