//! Centralized balance and tuning constants for train statistics.
//!
//! These values mirror the in-game pricing and the guard rails around input
//! size. Keeping them together means tuning only happens through reviewed code
//! changes rather than through external assets.

// Pricing ------------------------------------------------------------------
/// Purchase cost added for every car pulled by the train.
pub const CAR_COST: u64 = 16;
/// Upkeep added for every car pulled by the train.
pub const CAR_UPKEEP: u64 = 1;
/// Exponent offset applied to an engine's cost tier (`2^(tier + 8)`).
pub const COST_POWER_OFFSET: u32 = 8;
/// Exponent offset applied to an engine's upkeep tier (`2^(tier + 2)`).
pub const UPKEEP_POWER_OFFSET: u32 = 2;

// Input guards -------------------------------------------------------------
/// Largest ratio-reduced count of a single engine kind that will be expanded.
pub const MAX_REDUCED_COUNT: u32 = 1_300_000;

// Curve floors -------------------------------------------------------------
/// Lowest acceleration any single-kind curve reports once it bottoms out.
pub const MIN_ACCELERATION: f64 = 1.0 / 3.0;
