//! Error types surfaced by the stats engine.
use thiserror::Error;

use crate::engines::EngineKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// A ratio-reduced engine count is too large to expand.
    #[error("provided number(s) too large ({reduced} {kind} engines after reduction)")]
    InputTooLarge { kind: EngineKind, reduced: u32 },
}
