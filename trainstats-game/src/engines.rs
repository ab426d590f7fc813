//! Engine catalog: the closed set of engine kinds and their fixed parameters.
//!
//! Speed curves are hand-fitted to observed in-game data. They are piecewise and
//! the boundary inclusivity of every piece is significant.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::{COST_POWER_OFFSET, UPKEEP_POWER_OFFSET};

/// Pure curve mapping "cars pulled per engine" to a stat contribution.
pub type Curve = fn(f64) -> f64;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    Workhorse,
    Boiler,
    Industrial,
    Spark,
    Custom,
    Rescue,
}

impl EngineKind {
    pub const ALL: [Self; 6] = [
        Self::Workhorse,
        Self::Boiler,
        Self::Industrial,
        Self::Spark,
        Self::Custom,
        Self::Rescue,
    ];

    /// Stable lowercase identifier used in configs and on the command line.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Workhorse => "workhorse",
            Self::Boiler => "boiler",
            Self::Industrial => "industrial",
            Self::Spark => "spark",
            Self::Custom => "custom",
            Self::Rescue => "rescue",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Workhorse => 0,
            Self::Boiler => 1,
            Self::Industrial => 2,
            Self::Spark => 3,
            Self::Custom => 4,
            Self::Rescue => 5,
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown engine kind `{0}`")]
pub struct UnknownEngineKind(pub String);

impl FromStr for EngineKind {
    type Err = UnknownEngineKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.key().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownEngineKind(s.to_string()))
    }
}

/// Immutable parameters for one engine kind.
#[derive(Debug, Clone, Copy)]
pub struct EngineDefinition {
    cost_power: u32,
    upkeep_power: u32,
    /// Multiplier applied to top speed to estimate hill speed, in `(0, 1]`.
    pub climb_rating: f64,
    /// Top speed contribution as a function of cars per engine.
    pub speed: Curve,
}

impl EngineDefinition {
    #[must_use]
    pub const fn new(cost_power: u32, upkeep_power: u32, climb_rating: f64, speed: Curve) -> Self {
        Self {
            cost_power,
            upkeep_power,
            climb_rating,
            speed,
        }
    }

    /// Purchase price, `2^(cost_power + 8)`.
    #[must_use]
    pub const fn cost(&self) -> u64 {
        1 << (self.cost_power + COST_POWER_OFFSET)
    }

    /// Running cost, `2^(upkeep_power + 2)`.
    #[must_use]
    pub const fn upkeep(&self) -> u64 {
        1 << (self.upkeep_power + UPKEEP_POWER_OFFSET)
    }

    #[must_use]
    pub fn speed_at(&self, cars_per_engine: f64) -> f64 {
        (self.speed)(cars_per_engine)
    }
}

/// Lookup table of every engine kind's definition. Total over [`EngineKind`].
#[derive(Debug, Clone)]
pub struct EngineCatalog {
    definitions: [EngineDefinition; 6],
}

impl EngineCatalog {
    /// Build a catalog from explicit definitions, ordered as [`EngineKind::ALL`].
    #[must_use]
    pub const fn from_definitions(definitions: [EngineDefinition; 6]) -> Self {
        Self { definitions }
    }

    /// The stock engine lineup.
    #[must_use]
    pub const fn standard() -> Self {
        Self::from_definitions([
            EngineDefinition::new(1, 1, 0.5, workhorse_speed),
            EngineDefinition::new(0, 0, 0.4, boiler_speed),
            EngineDefinition::new(2, 2, 0.95, industrial_speed),
            EngineDefinition::new(3, 3, 0.5, spark_speed),
            EngineDefinition::new(1, 1, 0.75, custom_speed),
            EngineDefinition::new(3, 2, 1.0, rescue_speed),
        ])
    }

    #[must_use]
    pub const fn definition(&self, kind: EngineKind) -> &EngineDefinition {
        &self.definitions[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (EngineKind, &EngineDefinition)> {
        EngineKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.definition(kind)))
    }
}

impl Default for EngineCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

static STANDARD_CATALOG: EngineCatalog = EngineCatalog::standard();

/// Process-wide stock catalog.
#[must_use]
pub fn catalog() -> &'static EngineCatalog {
    &STANDARD_CATALOG
}

fn workhorse_speed(cars_per_engine: f64) -> f64 {
    if cars_per_engine <= 2.0 {
        return 50.0;
    }
    if cars_per_engine <= 4.0 {
        return 54.0 - 2.0 * cars_per_engine;
    }
    (70.0 - 6.0 * cars_per_engine).max(5.0)
}

fn boiler_speed(cars_per_engine: f64) -> f64 {
    if cars_per_engine < 6.0 {
        return 33.0 - cars_per_engine.powi(4) / 230.0;
    }
    (47.7 - 3.5 * cars_per_engine).max(3.0)
}

fn industrial_speed(cars_per_engine: f64) -> f64 {
    (48.0 - 3.5 * cars_per_engine).clamp(3.0, 30.0)
}

fn spark_speed(cars_per_engine: f64) -> f64 {
    if cars_per_engine <= 4.5 {
        return 75.0;
    }
    if cars_per_engine <= 6.0 {
        return 85.0 - 2.0 * cars_per_engine;
    }
    if cars_per_engine >= 8.0 {
        return 112.75 - 5.5 * cars_per_engine;
    }
    // No usable samples inside (6, 8); the midpoint reading stands in for the gap.
    71.0
}

fn custom_speed(cars_per_engine: f64) -> f64 {
    if cars_per_engine >= 2.0 {
        return (97.84 - 14.6 * cars_per_engine).max(7.0);
    }
    (78.83 - 5.0 * cars_per_engine).min(75.0)
}

fn rescue_speed(cars_per_engine: f64) -> f64 {
    if cars_per_engine <= 8.0 {
        return 27.0;
    }
    if cars_per_engine <= 12.0 {
        return 30.75 - cars_per_engine / 2.0;
    }
    41.6 - 1.4 * cars_per_engine
}
