//! Error and warning types for Coinfall layouts.
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal conditions: the computation for this input is abandoned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("invalid configuration: {0}")] InvalidConfiguration(String),
    #[error("split of {total} into {parts} parts did not converge after {attempts} attempts")] SplitNonConvergence { total: u64, parts: usize, attempts: u32 },
}

/// Which nesting level of the payout a split belongs to.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SplitLevel {
    /// Target prize into spin values.
    Spins,
    /// Spin value into combination totals.
    Combinations,
    /// Combination total into cell values.
    Cells,
}

/// Recoverable conditions: the layout is still produced, possibly with degraded quality.
#[derive(Error, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutWarning {
    #[error("no coin value range for wager {wager}, using derived bound")] ConfigurationMissing { wager: u64 },
    #[error("spin {spin}: requested {requested} cells, only {available} free")] ResourceExhaustion { spin: usize, requested: usize, available: usize },
    #[error("spin {spin}: largest connected region {connected} of {requested} cells, padded")] ClusteringDegraded { spin: usize, requested: usize, connected: usize },
    #[error("{level:?} split band inverted ({min} > {max}), clamped")] BoundInversion { level: SplitLevel, min: u64, max: u64 },
}

impl LayoutWarning {
    /// Short stable name, used for grouping in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConfigurationMissing { .. } => "configuration_missing",
            Self::ResourceExhaustion { .. } => "resource_exhaustion",
            Self::ClusteringDegraded { .. } => "clustering_degraded",
            Self::BoundInversion { .. } => "bound_inversion",
        }
    }
}
