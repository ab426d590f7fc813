//! Train statistics aggregation.
//!
//! Turns an engine mix and a car count into the stat readout shown in the
//! train builder: speeds, prices, and acceleration where a curve exists.
use serde::{Deserialize, Serialize};

use crate::acceleration::{AccelerationTable, acceleration_table};
use crate::constants::{CAR_COST, CAR_UPKEEP};
use crate::engines::{EngineCatalog, EngineDefinition, EngineKind, catalog};
use crate::error::StatsError;
use crate::numbers::{i64_to_f64, round_f64_to_i64, u64_to_f64, usize_to_f64};
use crate::ratio::{CanonicalMultiset, EngineCounts, reduce};

/// Derived statistics for one train.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsResult {
    pub top_speed: i64,
    pub hill_speed: i64,
    pub cost: u64,
    pub upkeep: u64,
    /// `None` when no acceleration curve exists for this engine mix.
    pub accel: Option<f64>,
    /// Time to reach top speed (`top_speed / accel`); 0 when `accel` is absent or zero.
    pub accel_time: f64,
}

impl StatsResult {
    #[must_use]
    pub const fn has_acceleration(&self) -> bool {
        self.accel.is_some()
    }
}

/// Stats aggregator bound to a catalog and an acceleration table.
#[derive(Debug, Clone, Copy)]
pub struct StatsCalculator<'a> {
    catalog: &'a EngineCatalog,
    accelerations: &'a AccelerationTable,
}

impl<'a> StatsCalculator<'a> {
    #[must_use]
    pub const fn new(catalog: &'a EngineCatalog, accelerations: &'a AccelerationTable) -> Self {
        Self {
            catalog,
            accelerations,
        }
    }

    /// Compute stats for `counts` engines pulling `cars` cars.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::InputTooLarge`] when a ratio-reduced count exceeds
    /// the expansion ceiling.
    pub fn compute(&self, counts: &EngineCounts, cars: u32) -> Result<StatsResult, StatsError> {
        let canonical = reduce(counts)?;
        Ok(self.compute_canonical(&canonical, cars))
    }

    /// Compute stats for an already reduced engine mix.
    #[must_use]
    pub fn compute_canonical(&self, canonical: &CanonicalMultiset, cars: u32) -> StatsResult {
        let load = cars_per_engine(canonical, cars);
        let engines = canonical.engines.as_slice();

        // Hill speed and acceleration time both derive from the rounded top speed.
        let top_speed = round_f64_to_i64(self.mean(engines, |engine| engine.speed_at(load)));
        let rounded_top = i64_to_f64(top_speed);
        let mean_climb = self.mean(engines, |engine| engine.climb_rating);
        let hill_speed = round_f64_to_i64(rounded_top * mean_climb);

        let scale = u64::from(canonical.scale_factor);
        let cars = u64::from(cars);
        let cost = cars * CAR_COST + scale * self.sum(engines, EngineDefinition::cost);
        let upkeep = cars * CAR_UPKEEP + scale * self.sum(engines, EngineDefinition::upkeep);

        let accel = self.accelerations.acceleration(engines, load);
        if accel.is_none() {
            log::debug!(
                "no acceleration curve for a {}-engine canonical mix",
                engines.len()
            );
        }
        let accel_time = match accel {
            Some(rate) if rate != 0.0 => rounded_top / rate,
            _ => 0.0,
        };

        StatsResult {
            top_speed,
            hill_speed,
            cost,
            upkeep,
            accel,
            accel_time,
        }
    }

    fn mean<F>(&self, engines: &[EngineKind], stat: F) -> f64
    where
        F: Fn(&EngineDefinition) -> f64,
    {
        if engines.is_empty() {
            return 0.0;
        }
        let n = usize_to_f64(engines.len());
        engines
            .iter()
            .map(|kind| stat(self.catalog.definition(*kind)))
            .fold(0.0, |acc, value| acc + value / n)
    }

    fn sum<F>(&self, engines: &[EngineKind], stat: F) -> u64
    where
        F: Fn(&EngineDefinition) -> u64,
    {
        engines
            .iter()
            .map(|kind| stat(self.catalog.definition(*kind)))
            .sum()
    }
}

impl StatsCalculator<'static> {
    /// Calculator over the stock catalog and acceleration table.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(catalog(), acceleration_table())
    }
}

impl Default for StatsCalculator<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

/// Cars pulled by each engine; 0 for a train with no engines.
#[must_use]
pub fn cars_per_engine(canonical: &CanonicalMultiset, cars: u32) -> f64 {
    let engines = canonical.total_engines();
    if engines == 0 {
        return 0.0;
    }
    f64::from(cars) / u64_to_f64(engines)
}

/// Compute stats with the stock catalog and acceleration table.
///
/// # Errors
///
/// Returns [`StatsError::InputTooLarge`] when a ratio-reduced count exceeds
/// the expansion ceiling.
pub fn compute(counts: &EngineCounts, cars: u32) -> Result<StatsResult, StatsError> {
    StatsCalculator::standard().compute(counts, cars)
}
