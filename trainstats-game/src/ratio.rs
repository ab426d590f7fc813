//! Ratio reduction of engine counts.
//!
//! Counts are divided through by their greatest common divisor so that, for
//! example, two workhorses with two boilers and one of each land on the same
//! canonical mix. The divisor is kept as a scale factor so that
//! absolute quantities such as cost can be restored.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::MAX_REDUCED_COUNT;
use crate::engines::EngineKind;
use crate::error::StatsError;
use crate::numbers::u32_to_usize;

/// Caller-supplied count per engine kind. Zero counts behave like absent kinds.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<EngineKind, u32>", into = "BTreeMap<EngineKind, u32>")]
pub struct EngineCounts(BTreeMap<EngineKind, u32>);

impl EngineCounts {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Set the count for `kind`, replacing any previous value.
    pub fn set(&mut self, kind: EngineKind, count: u32) {
        if count == 0 {
            self.0.remove(&kind);
        } else {
            self.0.insert(kind, count);
        }
    }

    #[must_use]
    pub fn with(mut self, kind: EngineKind, count: u32) -> Self {
        self.set(kind, count);
        self
    }

    #[must_use]
    pub fn get(&self, kind: EngineKind) -> u32 {
        self.0.get(&kind).copied().unwrap_or(0)
    }

    /// Kinds with a non-zero count, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (EngineKind, u32)> + '_ {
        self.0
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(kind, count)| (*kind, *count))
    }

    /// Total number of engines across all kinds.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.iter().map(|(_, count)| u64::from(count)).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Every count multiplied by `factor`, or `None` if any product overflows.
    #[must_use]
    pub fn scaled(&self, factor: u32) -> Option<Self> {
        let mut scaled = Self::new();
        for (kind, count) in self.iter() {
            scaled.set(kind, count.checked_mul(factor)?);
        }
        Some(scaled)
    }
}

impl FromIterator<(EngineKind, u32)> for EngineCounts {
    fn from_iter<T: IntoIterator<Item = (EngineKind, u32)>>(iter: T) -> Self {
        let mut counts = Self::new();
        for (kind, count) in iter {
            counts.set(kind, count);
        }
        counts
    }
}

impl From<BTreeMap<EngineKind, u32>> for EngineCounts {
    fn from(map: BTreeMap<EngineKind, u32>) -> Self {
        map.into_iter().collect()
    }
}

impl From<EngineCounts> for BTreeMap<EngineKind, u32> {
    fn from(counts: EngineCounts) -> Self {
        counts.0
    }
}

/// Ratio-reduced engine mix plus the factor that was divided out.
///
/// `scale_factor * engines.len()` always equals the input engine total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalMultiset {
    pub engines: Vec<EngineKind>,
    pub scale_factor: u32,
}

impl CanonicalMultiset {
    /// Reconstructed absolute engine count.
    #[must_use]
    pub fn total_engines(&self) -> u64 {
        u64::from(self.scale_factor) * u64::try_from(self.engines.len()).unwrap_or(u64::MAX)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }
}

#[must_use]
pub const fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Reduce `counts` to its simplest integer ratio and expand it into a multiset.
///
/// All-zero input yields an empty multiset with a scale factor of 1.
///
/// # Errors
///
/// Returns [`StatsError::InputTooLarge`] when any reduced count exceeds
/// [`MAX_REDUCED_COUNT`]. The check runs before anything is expanded.
pub fn reduce(counts: &EngineCounts) -> Result<CanonicalMultiset, StatsError> {
    let divisor = counts.iter().fold(0, |acc, (_, count)| gcd(acc, count));
    if divisor == 0 {
        return Ok(CanonicalMultiset {
            engines: Vec::new(),
            scale_factor: 1,
        });
    }

    let reduced: Vec<(EngineKind, u32)> = counts
        .iter()
        .map(|(kind, count)| (kind, count / divisor))
        .collect();
    if let Some(&(kind, count)) = reduced.iter().find(|(_, count)| *count > MAX_REDUCED_COUNT) {
        return Err(StatsError::InputTooLarge {
            kind,
            reduced: count,
        });
    }

    let length = reduced.iter().map(|(_, count)| u32_to_usize(*count)).sum();
    let mut engines = Vec::with_capacity(length);
    for (kind, count) in reduced {
        engines.extend(std::iter::repeat_n(kind, u32_to_usize(count)));
    }
    log::trace!(
        "reduced {} engines to {} with scale factor {divisor}",
        counts.total(),
        engines.len()
    );

    Ok(CanonicalMultiset {
        engines,
        scale_factor: divisor,
    })
}
