//! Acceleration curves keyed by engine-mix shape.
//!
//! Only the empty mix and single-kind mixes have measured curves. Any mix of two
//! or more kinds has no entry, and callers report acceleration as unavailable.
use std::sync::OnceLock;

use crate::constants::MIN_ACCELERATION;
use crate::engines::{Curve, EngineKind};
use crate::multiset::MultisetMap;

#[derive(Debug, Clone, Default)]
pub struct AccelerationTable {
    curves: MultisetMap<EngineKind, Curve>,
}

impl AccelerationTable {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            curves: MultisetMap::new(),
        }
    }

    /// The measured curves for the stock engine lineup.
    #[must_use]
    pub fn standard() -> Self {
        let mut table = Self::empty();
        table.register([], no_engines);
        table.register([EngineKind::Workhorse], workhorse_accel);
        table.register([EngineKind::Boiler], boiler_accel);
        table.register([EngineKind::Industrial], industrial_accel);
        table.register([EngineKind::Spark], spark_accel);
        table.register([EngineKind::Custom], custom_accel);
        table.register([EngineKind::Rescue], rescue_accel);
        table
    }

    /// Register a curve for a mix shape. The shape must already be ratio-reduced.
    pub fn register<I>(&mut self, shape: I, curve: Curve) -> Option<Curve>
    where
        I: IntoIterator<Item = EngineKind>,
    {
        self.curves.insert(shape, curve)
    }

    #[must_use]
    pub fn curve(&self, shape: &[EngineKind]) -> Option<Curve> {
        self.curves.get(shape).copied()
    }

    /// Evaluate the curve for `shape`, or `None` when the shape has no entry.
    #[must_use]
    pub fn acceleration(&self, shape: &[EngineKind], cars_per_engine: f64) -> Option<f64> {
        self.curve(shape).map(|curve| curve(cars_per_engine))
    }

    /// Number of registered shapes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.curves.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}

#[must_use]
pub fn acceleration_table() -> &'static AccelerationTable {
    static TABLE: OnceLock<AccelerationTable> = OnceLock::new();
    TABLE.get_or_init(AccelerationTable::standard)
}

const fn no_engines(_cars_per_engine: f64) -> f64 {
    0.0
}

fn workhorse_accel(cars_per_engine: f64) -> f64 {
    if cars_per_engine < 4.0 {
        return 3.5 - cars_per_engine / 7.0;
    }
    (4.9 - cars_per_engine / 2.0).max(MIN_ACCELERATION)
}

fn boiler_accel(cars_per_engine: f64) -> f64 {
    (2.59 - 0.024 * cars_per_engine.powi(2)).max(MIN_ACCELERATION)
}

fn industrial_accel(cars_per_engine: f64) -> f64 {
    if cars_per_engine < 7.0 {
        return 4.0 - cars_per_engine / 9.0;
    }
    (5.25 - (2.0 / 7.0) * cars_per_engine).max(MIN_ACCELERATION)
}

fn spark_accel(cars_per_engine: f64) -> f64 {
    if cars_per_engine >= 17.0 {
        return MIN_ACCELERATION;
    }
    if cars_per_engine > 8.0 {
        return 8.9 - 0.5 * cars_per_engine;
    }
    if cars_per_engine < 7.0 {
        return 6.2 - 0.17 * cars_per_engine;
    }
    5.0
}

fn custom_accel(cars_per_engine: f64) -> f64 {
    if cars_per_engine > 2.0 {
        return (5.76 - cars_per_engine).max(MIN_ACCELERATION);
    }
    if cars_per_engine == 0.0 {
        return 14.0 / 3.0;
    }
    if cars_per_engine <= 1.0 {
        return 13.0 / 3.0;
    }
    4.0
}

fn rescue_accel(cars_per_engine: f64) -> f64 {
    if cars_per_engine < 10.0 {
        return 5.04 - 0.106 * cars_per_engine;
    }
    if cars_per_engine <= 12.0 {
        return 4.0;
    }
    8.0 - cars_per_engine / 3.0
}
