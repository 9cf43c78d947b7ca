//! Shared test helpers for property and E2E tests.

use std::collections::BTreeSet;

use coinfall_core::config::{CoinValueRange, PayoutConfig};
use coinfall_core::types::PayoutLayout;
use coinfall_layout::engine::LayoutEngine;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Deterministic generator for a seed.
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Reference configuration for `wager` with one matching coin range.
pub fn config(wager: u64, base_prize: f64) -> PayoutConfig {
    PayoutConfig {
        wager,
        base_prize,
        coin_value_ranges: vec![CoinValueRange {
            wager,
            min_coin_value: 500,
            max_coin_value: 2_500,
        }],
        ..PayoutConfig::default()
    }
}

/// Plan with the production engine and a fixed seed.
pub fn plan(config: &PayoutConfig, seed: u64) -> PayoutLayout {
    LayoutEngine::new()
        .plan_with(config, &mut rng(seed))
        .unwrap()
}

/// Every violated layout invariant, as readable strings. Empty means consistent.
pub fn invariant_violations(layout: &PayoutLayout) -> Vec<String> {
    let mut out = Vec::new();
    let unit = layout.rounding_unit;
    let board = layout.grid.cell_count();

    if layout.spin_sum() != layout.target_total {
        out.push(format!("spins sum to {}, target {}", layout.spin_sum(), layout.target_total));
    }
    for (s, spin) in layout.spins.iter().enumerate() {
        if spin.combination_sum() != spin.spin_value {
            out.push(format!("spin {s}: combinations sum to {}, value {}", spin.combination_sum(), spin.spin_value));
        }
        if spin.spin_value % unit != 0 {
            out.push(format!("spin {s}: value {} off unit", spin.spin_value));
        }
        let mut seen = BTreeSet::new();
        for (c, combo) in spin.combinations.iter().enumerate() {
            if combo.cell_sum() != combo.total_value {
                out.push(format!("spin {s} combo {c}: cells sum to {}, total {}", combo.cell_sum(), combo.total_value));
            }
            let n = combo.cells.len();
            if n < 3 || n > layout.max_cells_per_combination {
                out.push(format!("spin {s} combo {c}: {n} cells"));
            }
            for cell in &combo.cells {
                if cell.index >= board || !seen.insert(cell.index) {
                    out.push(format!("spin {s} combo {c}: cell {} reused or off board", cell.index));
                }
                if cell.value % unit != 0 {
                    out.push(format!("spin {s} combo {c}: value {} off unit", cell.value));
                }
                if cell.color != combo.color {
                    out.push(format!("spin {s} combo {c}: cell color differs"));
                }
            }
        }
    }
    out
}
