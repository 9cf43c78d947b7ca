//! Layout types: spins, combinations, and cell assignments.
//!
//! All monetary values are integer coin units, already snapped to the
//! rounding unit. Entities are built fresh per computation and never
//! mutated once the planner returns.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::LayoutWarning;

/// Color tag of a combination and the cells it occupies.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum CoinColor {
    Red,
    Green,
    Blue,
}

impl CoinColor {
    /// Every color, in declaration order.
    pub const ALL: [CoinColor; 3] = [CoinColor::Red, CoinColor::Green, CoinColor::Blue];

    /// Single-letter tag for compact board rendering.
    pub fn tag(self) -> char {
        match self {
            Self::Red => 'R',
            Self::Green => 'G',
            Self::Blue => 'B',
        }
    }
}

impl fmt::Display for CoinColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        };
        f.write_str(name)
    }
}

/// One grid cell holding one coin value.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellAssignment {
    /// Row-major grid index in `[0, rows * columns)`.
    pub index: usize,
    /// Coin value placed on the cell.
    pub value: u64,
    /// Color of the owning combination.
    pub color: CoinColor,
}

/// A colored group of cells whose values sum to `total_value`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Combination {
    pub color: CoinColor,
    pub total_value: u64,
    pub cells: Vec<CellAssignment>,
}

impl Combination {
    /// Sum of the cell values (should equal `total_value`).
    pub fn cell_sum(&self) -> u64 {
        self.cells.iter().map(|c| c.value).sum()
    }

    /// Grid indices occupied by this combination, in placement order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells.iter().map(|c| c.index)
    }
}

/// One top-level slice of the prize, laid out on its own board.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SpinPlan {
    pub spin_value: u64,
    pub combinations: Vec<Combination>,
}

impl SpinPlan {
    /// Sum of the combination totals (should equal `spin_value`).
    pub fn combination_sum(&self) -> u64 {
        self.combinations.iter().map(|c| c.total_value).sum()
    }

    /// Number of cells occupied on this spin's board.
    pub fn occupied_cells(&self) -> usize {
        self.combinations.iter().map(|c| c.cells.len()).sum()
    }
}

/// Shape of the board every spin is laid out on.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridShape {
    pub rows: usize,
    pub columns: usize,
}

impl GridShape {
    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.rows * self.columns
    }
}

/// Complete result of one planner invocation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PayoutLayout {
    pub wager: u64,
    /// Base prize snapped to the rounding unit; the spins sum to this.
    pub target_total: u64,
    pub rounding_unit: u64,
    pub grid: GridShape,
    /// Largest number of cells any one combination may occupy.
    pub max_cells_per_combination: usize,
    pub spins: Vec<SpinPlan>,
    /// Recoverable conditions met while building the layout.
    #[serde(default)]
    pub warnings: Vec<LayoutWarning>,
}

impl PayoutLayout {
    /// Sum of all spin values.
    pub fn spin_sum(&self) -> u64 {
        self.spins.iter().map(|s| s.spin_value).sum()
    }

    /// Total number of combinations across all spins.
    pub fn combination_count(&self) -> usize {
        self.spins.iter().map(|s| s.combinations.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combo(color: CoinColor, values: &[(usize, u64)]) -> Combination {
        Combination {
            color,
            total_value: values.iter().map(|(_, v)| v).sum(),
            cells: values
                .iter()
                .map(|&(index, value)| CellAssignment { index, value, color })
                .collect(),
        }
    }

    #[test]
    fn combination_sums_cells() {
        let c = combo(CoinColor::Red, &[(0, 500), (1, 1_000), (5, 500)]);
        assert_eq!(c.cell_sum(), 2_000);
        assert_eq!(c.indices().collect::<Vec<_>>(), vec![0, 1, 5]);
    }

    #[test]
    fn spin_sums_combinations() {
        let spin = SpinPlan {
            spin_value: 3_500,
            combinations: vec![
                combo(CoinColor::Red, &[(0, 500), (1, 500), (2, 500)]),
                combo(CoinColor::Blue, &[(10, 500), (11, 1_000), (12, 500)]),
            ],
        };
        assert_eq!(spin.combination_sum(), 3_500);
        assert_eq!(spin.occupied_cells(), 6);
    }

    #[test]
    fn grid_shape_cell_count() {
        assert_eq!(GridShape { rows: 3, columns: 5 }.cell_count(), 15);
    }

    #[test]
    fn color_tags_unique() {
        let tags: Vec<char> = CoinColor::ALL.iter().map(|c| c.tag()).collect();
        assert_eq!(tags, vec!['R', 'G', 'B']);
    }

    #[test]
    fn layout_json_roundtrip_keeps_warnings() {
        let layout = PayoutLayout {
            wager: 100,
            target_total: 1_500,
            rounding_unit: 500,
            grid: GridShape { rows: 3, columns: 5 },
            max_cells_per_combination: 7,
            spins: vec![SpinPlan {
                spin_value: 1_500,
                combinations: vec![combo(CoinColor::Green, &[(0, 500), (1, 500), (2, 500)])],
            }],
            warnings: vec![LayoutWarning::ConfigurationMissing { wager: 100 }],
        };
        let json = serde_json::to_string(&layout).unwrap();
        let back: PayoutLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(back, layout);
    }
}
