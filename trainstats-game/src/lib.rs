//! Train Stats Engine
//!
//! Platform-agnostic core logic for the train builder's stat readout.
//! This crate computes speeds, prices, and acceleration for a mix of engines
//! without any UI or platform-specific dependencies.

pub mod acceleration;
pub mod constants;
pub mod engines;
pub mod error;
pub mod format;
pub mod multiset;
pub mod numbers;
pub mod presets;
pub mod ratio;
pub mod stats;
pub mod train;

// Re-export commonly used types
pub use acceleration::{AccelerationTable, acceleration_table};
pub use engines::{Curve, EngineCatalog, EngineDefinition, EngineKind, UnknownEngineKind, catalog};
pub use error::StatsError;
pub use format::{
    FractionGlyphs, describe_error, describe_failure, round_to_half, round_to_half_with,
    round_to_third, round_to_third_with,
};
pub use multiset::MultisetMap;
pub use presets::{Preset, PresetCatalog, presets};
pub use ratio::{CanonicalMultiset, EngineCounts, gcd, reduce};
pub use stats::{StatsCalculator, StatsResult, cars_per_engine, compute};
pub use train::{TrainConfig, TrainConfigError};
