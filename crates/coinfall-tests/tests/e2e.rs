//! End-to-end tests for the Coinfall layout engine.
//!
//! Each test plans a layout for a reference configuration and checks the
//! result through the public API only: the planner trait, the validator,
//! and the serialized form a presenter would receive.

use std::collections::BTreeSet;

use coinfall_core::config::PayoutConfig;
use coinfall_core::error::{LayoutError, LayoutWarning};
use coinfall_core::traits::LayoutPlanner;
use coinfall_core::types::PayoutLayout;
use coinfall_layout::cluster::{allocate, ClusterQuality};
use coinfall_layout::engine::LayoutEngine;
use coinfall_layout::estimator::estimate_spin_count;
use coinfall_layout::grid::Grid;
use coinfall_layout::splitter::{split, SplitBounds};
use coinfall_layout::validator::validate;
use coinfall_tests::helpers::*;

// --- reference scenarios ---

#[test]
fn threshold_prize_uses_five_spins() {
    assert_eq!(estimate_spin_count(100, 27_000.0, 10).unwrap(), 5);
    let layout = plan(&config(100, 27_000.0), 1);
    assert_eq!(layout.spins.len(), 5);
    assert_eq!(layout.spin_sum(), 27_000);
    assert!(invariant_violations(&layout).is_empty());
}

#[test]
fn thousand_splits_into_two_five_hundreds() {
    let s = split(&mut rng(2), 1_000, 2, SplitBounds::new(0, 1_000), 500).unwrap();
    assert_eq!(s.parts, vec![500, 500]);
}

#[test]
fn five_cells_on_empty_reference_board() {
    let grid = Grid::standard();
    let out = allocate(&mut rng(3), &grid, 5, &BTreeSet::new());
    let distinct: BTreeSet<usize> = out.cells.iter().copied().collect();
    assert_eq!(distinct.len(), 5);
    assert!(distinct.iter().all(|&i| i < 15));
    assert_eq!(out.quality, ClusterQuality::Connected);
}

#[test]
fn every_wager_tier_plans_cleanly() {
    for wager in [50, 100, 200] {
        for seed in 0..25 {
            let layout = plan(&config(wager, 12_000.0 * wager as f64 / 100.0), seed);
            let violations = invariant_violations(&layout);
            assert!(violations.is_empty(), "wager {wager} seed {seed}: {violations:#?}");
            assert!(validate(&layout).all_passed());
        }
    }
}

#[test]
fn untiered_wager_falls_back_with_warning() {
    let cfg = PayoutConfig { wager: 150, base_prize: 9_000.0, ..PayoutConfig::default() };
    let layout = plan(&cfg, 4);
    assert_eq!(layout.warnings.first(), Some(&LayoutWarning::ConfigurationMissing { wager: 150 }));
    assert!(invariant_violations(&layout).is_empty());
}

#[test]
fn zero_wager_fails_fast() {
    let cfg = PayoutConfig { wager: 0, ..PayoutConfig::default() };
    let err = LayoutEngine::new().plan_with(&cfg, &mut rng(5)).unwrap_err();
    assert!(matches!(err, LayoutError::InvalidConfiguration(_)));
}

// --- planner seam ---

#[test]
fn boxed_planner_matches_engine() {
    let planner: Box<dyn LayoutPlanner> = Box::new(LayoutEngine::new());
    let cfg = PayoutConfig::default();
    let mut r = rng(6);
    let via_trait = planner.plan(&cfg, &mut r).unwrap();
    assert_eq!(via_trait, plan(&cfg, 6));
    assert_eq!(planner.spin_count(&cfg).unwrap() as usize, via_trait.spins.len());
}

// --- presentation contract ---

#[test]
fn layout_survives_json() {
    let layout = plan(&config(200, 40_000.0), 7);
    let json = serde_json::to_string(&layout).unwrap();
    let back: PayoutLayout = serde_json::from_str(&json).unwrap();
    assert_eq!(back, layout);
    assert!(validate(&back).all_passed());
}

#[test]
fn config_record_from_json() {
    let json = r#"{
        "wager": 100,
        "base_prize": 15000,
        "max_spins": 8,
        "max_combinations": 3,
        "coin_value_ranges": [{ "wager": 100, "min_coin_value": 500, "max_coin_value": 2000 }]
    }"#;
    let cfg = PayoutConfig::from_json(json).unwrap();
    assert_eq!(cfg.rounding_unit, 500);
    assert_eq!(cfg.grid.cell_count(), 15);
    let layout = plan(&cfg, 8);
    assert_eq!(layout.spin_sum(), 15_000);
    assert!(invariant_violations(&layout).is_empty());
}
