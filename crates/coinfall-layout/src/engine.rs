//! Layout engine implementing the [`LayoutPlanner`] trait.
//!
//! Runs the full pipeline for one configuration record: validate the record,
//! estimate the spin count, split the target into spins, assemble every spin
//! on its own board, then check the result bottom-up. Failing self-checks are
//! logged, never fatal; the layout is returned as built.

use coinfall_core::config::PayoutConfig;
use coinfall_core::error::{LayoutError, LayoutWarning, SplitLevel};
use coinfall_core::traits::LayoutPlanner;
use coinfall_core::types::PayoutLayout;
use rand::{Rng, RngCore};
use tracing::{debug, warn};

use crate::assembler::{assemble_spin, AssemblyContext};
use crate::estimator::estimate_spin_count;
use crate::grid::Grid;
use crate::splitter::{split, SplitBounds};
use crate::validator::validate;

/// The production layout planner.
///
/// Stateless; every call draws from the generator it is given.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine;

impl LayoutEngine {
    /// Create a new LayoutEngine.
    pub fn new() -> Self {
        Self
    }

    /// [`LayoutPlanner::plan`] for any generator, sized or not.
    pub fn plan_with<R: Rng + ?Sized>(&self, config: &PayoutConfig, rng: &mut R) -> Result<PayoutLayout, LayoutError> {
        config.validate()?;

        let grid = Grid::new(config.grid);
        let target = config.target_total();
        let spin_count = self.spin_count(config)?;
        debug!(wager = config.wager, target, spin_count, "planning layout");

        let mut warnings = Vec::new();
        let coin_range = config.resolve_coin_range();
        if !coin_range.configured {
            let w = LayoutWarning::ConfigurationMissing { wager: config.wager };
            warn!(%w, min = coin_range.min, max = coin_range.max, "using derived coin range");
            warnings.push(w);
        }

        let spins = split(rng, target, spin_count as usize, SplitBounds::PROPORTIONAL, config.rounding_unit)?;
        if let Some((min, max)) = spins.inversion {
            let w = LayoutWarning::BoundInversion { level: SplitLevel::Spins, min, max };
            warn!(%w, "split band inverted");
            warnings.push(w);
        }
        debug!(values = ?spins.parts, attempts = spins.attempts, "split target into spins");

        let ctx = AssemblyContext {
            grid: &grid,
            coin_range,
            max_combinations: config.max_combinations,
            max_adjacent_elements: config.max_adjacent_elements,
            rounding_unit: config.rounding_unit,
        };
        let mut plans = Vec::with_capacity(spins.parts.len());
        for (i, &value) in spins.parts.iter().enumerate() {
            let assembly = assemble_spin(rng, &ctx, i, value)?;
            warnings.extend(assembly.warnings);
            plans.push(assembly.spin);
        }

        let layout = PayoutLayout {
            wager: config.wager,
            target_total: target,
            rounding_unit: config.rounding_unit,
            grid: config.grid,
            max_cells_per_combination: config.max_cells_per_combination(),
            spins: plans,
            warnings,
        };

        let report = validate(&layout);
        for failure in report.failures() {
            warn!(%failure, "layout self-check failed");
        }
        debug!(
            spins = layout.spins.len(),
            combinations = layout.combination_count(),
            warnings = layout.warnings.len(),
            passed = report.all_passed(),
            "layout complete"
        );

        Ok(layout)
    }
}

impl LayoutPlanner for LayoutEngine {
    fn plan(&self, config: &PayoutConfig, rng: &mut dyn RngCore) -> Result<PayoutLayout, LayoutError> {
        self.plan_with(config, rng)
    }

    fn spin_count(&self, config: &PayoutConfig) -> Result<u32, LayoutError> {
        estimate_spin_count(config.wager, config.base_prize, config.max_spins)
    }
}
