//! Batch planning over consecutive seeds.

use std::collections::BTreeMap;
use std::fmt;

use coinfall_core::config::PayoutConfig;
use coinfall_layout::engine::LayoutEngine;
use coinfall_layout::validator::validate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, warn};

/// Aggregate outcome of a batch.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Summary {
    pub runs: u32,
    pub passed: u32,
    pub failed: u32,
    /// Runs the engine rejected outright.
    pub errors: u32,
    pub warnings: BTreeMap<&'static str, u32>,
    pub spins: u64,
    pub combinations: u64,
}

impl Summary {
    pub fn average_spins(&self) -> f64 {
        let planned = self.passed + self.failed;
        if planned == 0 { 0.0 } else { self.spins as f64 / f64::from(planned) }
    }

    pub fn average_combinations_per_spin(&self) -> f64 {
        if self.spins == 0 { 0.0 } else { self.combinations as f64 / self.spins as f64 }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "runs {}  passed {}  failed {}  errors {}", self.runs, self.passed, self.failed, self.errors)?;
        writeln!(
            f,
            "avg spins {:.2}  avg combinations/spin {:.2}",
            self.average_spins(),
            self.average_combinations_per_spin()
        )?;
        for (kind, count) in &self.warnings {
            writeln!(f, "  {kind}: {count}")?;
        }
        Ok(())
    }
}

/// Plan `runs` layouts from seeds `first_seed`, `first_seed + 1`, ...
pub fn run(engine: &LayoutEngine, config: &PayoutConfig, first_seed: u64, runs: u32) -> Summary {
    let mut summary = Summary { runs, ..Summary::default() };
    for i in 0..runs {
        let seed = first_seed.wrapping_add(u64::from(i));
        let layout = match engine.plan_with(config, &mut StdRng::seed_from_u64(seed)) {
            Ok(l) => l,
            Err(e) => {
                warn!(seed, error = %e, "plan failed");
                summary.errors += 1;
                continue;
            }
        };
        if validate(&layout).all_passed() {
            summary.passed += 1;
        } else {
            summary.failed += 1;
        }
        for w in &layout.warnings {
            *summary.warnings.entry(w.kind()).or_default() += 1;
        }
        summary.spins += layout.spins.len() as u64;
        summary.combinations += layout.combination_count() as u64;
        debug!(seed, spins = layout.spins.len(), "simulated run");
    }
    summary
}
