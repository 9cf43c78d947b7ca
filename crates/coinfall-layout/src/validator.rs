//! Consistency checks over a finished layout.
//!
//! Every check is recorded, passing or not, so a report doubles as an audit
//! trail. Boards are checked per spin: cells must be distinct and on the
//! board within a spin, but may repeat across spins.

use std::collections::BTreeSet;
use std::fmt;

use coinfall_core::constants::MIN_COINS_PER_COMBINATION;
use coinfall_core::rounding::is_multiple_of;
use coinfall_core::types::PayoutLayout;
use serde::Serialize;

/// What a check looked at.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum CheckKind {
    /// Cell values of one combination sum to its total.
    CombinationSum { spin: usize, combination: usize },
    /// Combination totals of one spin sum to the spin value.
    SpinSum { spin: usize },
    /// Spin values sum to the layout target.
    TotalSum,
    /// Cells of one spin are distinct and on the board.
    BoardCells { spin: usize },
    /// A combination holds between the minimum and the configured maximum of cells.
    CombinationSize { spin: usize, combination: usize },
    /// Every cell value of one spin is a multiple of the rounding unit.
    RoundingUnit { spin: usize },
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CombinationSum { spin, combination } => write!(f, "spin {spin} combination {combination} sum"),
            Self::SpinSum { spin } => write!(f, "spin {spin} sum"),
            Self::TotalSum => write!(f, "total sum"),
            Self::BoardCells { spin } => write!(f, "spin {spin} board cells"),
            Self::CombinationSize { spin, combination } => write!(f, "spin {spin} combination {combination} size"),
            Self::RoundingUnit { spin } => write!(f, "spin {spin} rounding"),
        }
    }
}

/// One recorded check.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Check {
    #[serde(flatten)]
    pub kind: CheckKind,
    pub expected: u64,
    pub actual: u64,
    pub passed: bool,
}

impl Check {
    fn equal(kind: CheckKind, expected: u64, actual: u64) -> Self {
        Self { kind, expected, actual, passed: expected == actual }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed { "ok" } else { "FAILED" };
        write!(f, "{}: expected {}, got {} [{status}]", self.kind, self.expected, self.actual)
    }
}

/// All checks run against one layout.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub checks: Vec<Check>,
}

impl ValidationReport {
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &Check> + '_ {
        self.checks.iter().filter(|c| !c.passed)
    }
}

/// Check sums, board occupancy, combination sizes, and rounding.
pub fn validate(layout: &PayoutLayout) -> ValidationReport {
    let mut checks = Vec::new();
    let board = layout.grid.cell_count();

    for (s, spin) in layout.spins.iter().enumerate() {
        for (c, combo) in spin.combinations.iter().enumerate() {
            checks.push(Check::equal(
                CheckKind::CombinationSum { spin: s, combination: c },
                combo.total_value,
                combo.cell_sum(),
            ));

            // Expected is the configured maximum; passing also requires the minimum.
            let size = combo.cells.len();
            checks.push(Check {
                kind: CheckKind::CombinationSize { spin: s, combination: c },
                expected: layout.max_cells_per_combination as u64,
                actual: size as u64,
                passed: (MIN_COINS_PER_COMBINATION..=layout.max_cells_per_combination).contains(&size),
            });
        }

        checks.push(Check::equal(CheckKind::SpinSum { spin: s }, spin.spin_value, spin.combination_sum()));

        // Expected: every occupied cell is distinct and on the board.
        let distinct: BTreeSet<usize> = spin
            .combinations
            .iter()
            .flat_map(|c| c.indices())
            .filter(|&i| i < board)
            .collect();
        checks.push(Check::equal(
            CheckKind::BoardCells { spin: s },
            spin.occupied_cells() as u64,
            distinct.len() as u64,
        ));

        let off_unit = spin
            .combinations
            .iter()
            .flat_map(|c| &c.cells)
            .filter(|cell| !is_multiple_of(cell.value, layout.rounding_unit))
            .count();
        checks.push(Check::equal(CheckKind::RoundingUnit { spin: s }, 0, off_unit as u64));
    }

    checks.push(Check::equal(CheckKind::TotalSum, layout.target_total, layout.spin_sum()));

    ValidationReport { checks }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinfall_core::types::{CellAssignment, CoinColor, Combination, GridShape, SpinPlan};

    fn combo(color: CoinColor, cells: &[(usize, u64)]) -> Combination {
        Combination {
            color,
            total_value: cells.iter().map(|(_, v)| v).sum(),
            cells: cells
                .iter()
                .map(|&(index, value)| CellAssignment { index, value, color })
                .collect(),
        }
    }

    fn layout(spins: Vec<SpinPlan>) -> PayoutLayout {
        let target_total = spins.iter().map(|s| s.spin_value).sum();
        PayoutLayout {
            wager: 100,
            target_total,
            rounding_unit: 500,
            grid: GridShape { rows: 3, columns: 5 },
            max_cells_per_combination: 7,
            spins,
            warnings: Vec::new(),
        }
    }

    fn good() -> PayoutLayout {
        let a = combo(CoinColor::Red, &[(0, 500), (1, 500), (2, 1_000)]);
        let b = combo(CoinColor::Blue, &[(10, 500), (11, 500), (12, 500), (13, 500)]);
        let c = combo(CoinColor::Green, &[(0, 1_000), (5, 500), (10, 500)]);
        layout(vec![
            SpinPlan { spin_value: 4_000, combinations: vec![a, b] },
            // reuses cells 0 and 10 from the previous spin
            SpinPlan { spin_value: 2_000, combinations: vec![c] },
        ])
    }

    fn failed_kinds(report: &ValidationReport) -> Vec<CheckKind> {
        report.failures().map(|c| c.kind).collect()
    }

    #[test]
    fn consistent_layout_passes() {
        let report = validate(&good());
        assert!(report.all_passed(), "{:?}", failed_kinds(&report));
        // 3 combos x 2 + 2 spins x 3 + total
        assert_eq!(report.checks.len(), 13);
    }

    #[test]
    fn empty_layout_passes() {
        let report = validate(&layout(Vec::new()));
        assert!(report.all_passed());
        assert_eq!(report.checks.len(), 1);
    }

    #[test]
    fn detects_combination_sum_mismatch() {
        let mut l = good();
        l.spins[0].combinations[0].cells[0].value = 1_000;
        let failed = failed_kinds(&validate(&l));
        assert!(failed.contains(&CheckKind::CombinationSum { spin: 0, combination: 0 }));
    }

    #[test]
    fn detects_spin_and_total_mismatch() {
        let mut l = good();
        l.spins[1].spin_value = 2_500;
        let failed = failed_kinds(&validate(&l));
        assert_eq!(failed, vec![CheckKind::SpinSum { spin: 1 }, CheckKind::TotalSum]);
    }

    #[test]
    fn detects_reused_cell_within_spin() {
        let mut l = good();
        l.spins[0].combinations[1].cells[0].index = 2;
        let failed = failed_kinds(&validate(&l));
        assert_eq!(failed, vec![CheckKind::BoardCells { spin: 0 }]);
    }

    #[test]
    fn detects_off_board_cell() {
        let mut l = good();
        l.spins[1].combinations[0].cells[2].index = 15;
        let failed = failed_kinds(&validate(&l));
        assert_eq!(failed, vec![CheckKind::BoardCells { spin: 1 }]);
    }

    #[test]
    fn detects_undersized_and_oversized_combinations() {
        let mut l = good();
        l.spins[0].combinations[0] = combo(CoinColor::Red, &[(0, 1_000), (1, 1_000)]);
        l.max_cells_per_combination = 3;
        let failed = failed_kinds(&validate(&l));
        assert_eq!(
            failed,
            vec![
                CheckKind::CombinationSize { spin: 0, combination: 0 },
                CheckKind::CombinationSize { spin: 0, combination: 1 },
            ]
        );
    }

    #[test]
    fn detects_off_unit_value() {
        let mut l = good();
        l.spins[1].combinations[0] = combo(CoinColor::Green, &[(0, 750), (5, 750), (10, 500)]);
        let failed = failed_kinds(&validate(&l));
        assert_eq!(failed, vec![CheckKind::RoundingUnit { spin: 1 }]);
    }

    #[test]
    fn check_display() {
        let c = Check::equal(CheckKind::SpinSum { spin: 2 }, 1_000, 1_500);
        assert_eq!(c.to_string(), "spin 2 sum: expected 1000, got 1500 [FAILED]");
    }

    #[test]
    fn report_serializes_flat() {
        let c = Check::equal(CheckKind::TotalSum, 500, 500);
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["check"], "total_sum");
        assert_eq!(json["passed"], true);
    }
}
