//! The plain configuration record consumed by the planner.
//!
//! Loading and storage belong to the caller: the core only deserializes,
//! validates, and reads this record. Wager tiers map to inclusive bounds on
//! a single cell's value via [`CoinValueRange`].

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ROUNDING_UNIT, GRID_COLUMNS, GRID_ROWS, MAX_COINS_PER_COMBINATION, MIN_COINS_PER_COMBINATION,
    MIN_SPINS,
};
use crate::error::LayoutError;
use crate::rounding::round_to_nearest;
use crate::types::GridShape;

/// Inclusive bound on any single cell's value for one wager tier.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CoinValueRange {
    pub wager: u64,
    pub min_coin_value: u64,
    pub max_coin_value: u64,
}

/// Coin bound in effect for a computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCoinRange {
    pub min: u64,
    pub max: u64,
    /// `false` when no tier matched and the bound was derived from the prize.
    pub configured: bool,
}

/// Input record for one payout computation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PayoutConfig {
    pub wager: u64,
    pub base_prize: f64,
    pub max_spins: u32,
    pub max_combinations: u32,
    /// Upper bound on cells per combination; 0 means unbounded.
    #[serde(default)]
    pub max_adjacent_elements: u32,
    #[serde(default)]
    pub coin_value_ranges: Vec<CoinValueRange>,
    #[serde(default = "default_rounding_unit")]
    pub rounding_unit: u64,
    #[serde(default = "default_grid")]
    pub grid: GridShape,
}

fn default_rounding_unit() -> u64 {
    DEFAULT_ROUNDING_UNIT
}

fn default_grid() -> GridShape {
    GridShape { rows: GRID_ROWS, columns: GRID_COLUMNS }
}

impl Default for GridShape {
    fn default() -> Self {
        default_grid()
    }
}

impl Default for PayoutConfig {
    fn default() -> Self {
        Self {
            wager: 100,
            base_prize: 12_000.0,
            max_spins: 10,
            max_combinations: 4,
            max_adjacent_elements: 7,
            coin_value_ranges: vec![
                CoinValueRange { wager: 50, min_coin_value: 500, max_coin_value: 1_500 },
                CoinValueRange { wager: 100, min_coin_value: 500, max_coin_value: 2_500 },
                CoinValueRange { wager: 200, min_coin_value: 1_000, max_coin_value: 5_000 },
            ],
            rounding_unit: default_rounding_unit(),
            grid: default_grid(),
        }
    }
}

impl PayoutConfig {
    /// Parse a configuration record from JSON.
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        serde_json::from_str(json).map_err(|e| LayoutError::InvalidConfiguration(e.to_string()))
    }

    /// Check the record's invariants.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let invalid = |msg: String| Err(LayoutError::InvalidConfiguration(msg));
        if self.wager == 0 {
            return invalid("wager must be positive".into());
        }
        if !self.base_prize.is_finite() || self.base_prize < 0.0 {
            return invalid(format!("base_prize must be a non-negative number, got {}", self.base_prize));
        }
        if self.max_spins < 2 {
            return invalid(format!("max_spins must be at least 2, got {}", self.max_spins));
        }
        if self.max_combinations < 1 {
            return invalid("max_combinations must be at least 1".into());
        }
        if self.max_adjacent_elements != 0 && (self.max_adjacent_elements as usize) < MIN_COINS_PER_COMBINATION {
            return invalid(format!(
                "max_adjacent_elements must be 0 or at least {MIN_COINS_PER_COMBINATION}, got {}",
                self.max_adjacent_elements
            ));
        }
        if self.rounding_unit == 0 {
            return invalid("rounding_unit must be positive".into());
        }
        if self.grid.rows == 0 || self.grid.columns == 0 {
            return invalid(format!("grid must be non-empty, got {}x{}", self.grid.rows, self.grid.columns));
        }
        if self.grid.cell_count() < MIN_COINS_PER_COMBINATION {
            return invalid(format!("grid must hold at least {MIN_COINS_PER_COMBINATION} cells"));
        }
        for range in &self.coin_value_ranges {
            if range.max_coin_value == 0 || range.min_coin_value > range.max_coin_value {
                return invalid(format!(
                    "coin value range for wager {} is inverted or empty: [{}, {}]",
                    range.wager, range.min_coin_value, range.max_coin_value
                ));
            }
        }
        Ok(())
    }

    /// Exact-match lookup of the coin range for `wager`.
    pub fn coin_range_for(&self, wager: u64) -> Option<&CoinValueRange> {
        self.coin_value_ranges.iter().find(|r| r.wager == wager)
    }

    /// Coin bound for this record's wager, falling back to
    /// `[base_prize / MIN_SPINS, base_prize]` when no tier matches.
    pub fn resolve_coin_range(&self) -> ResolvedCoinRange {
        match self.coin_range_for(self.wager) {
            Some(r) => ResolvedCoinRange {
                min: r.min_coin_value,
                max: r.max_coin_value,
                configured: true,
            },
            None => {
                let unit = self.rounding_unit;
                let max = round_to_nearest(self.base_prize, unit).max(unit);
                let min = round_to_nearest(self.base_prize / f64::from(MIN_SPINS), unit).min(max);
                ResolvedCoinRange { min, max, configured: false }
            }
        }
    }

    /// Cells one combination may occupy: `max_adjacent_elements` (when set)
    /// capped by [`MAX_COINS_PER_COMBINATION`].
    pub fn max_cells_per_combination(&self) -> usize {
        match self.max_adjacent_elements {
            0 => MAX_COINS_PER_COMBINATION,
            n => (n as usize).min(MAX_COINS_PER_COMBINATION),
        }
    }

    /// Target total every spin sums to: the base prize snapped to the rounding unit.
    pub fn target_total(&self) -> u64 {
        round_to_nearest(self.base_prize, self.rounding_unit)
    }
}
