//! Trait interfaces for Coinfall.
//!
//! - [`LayoutPlanner`]: turns a configuration record into a payout layout
//!   (coinfall-layout implements)

use rand::RngCore;

use crate::config::PayoutConfig;
use crate::error::LayoutError;
use crate::types::PayoutLayout;

/// Builds a complete, internally consistent payout layout.
///
/// The generator is passed in explicitly so that a fixed seed reproduces the
/// same layout. Implementations hold no state between calls.
pub trait LayoutPlanner: Send + Sync {
    /// Plan the spins, combinations, and cell values for `config`.
    fn plan(&self, config: &PayoutConfig, rng: &mut dyn RngCore) -> Result<PayoutLayout, LayoutError>;

    /// Number of spins the planner would use for `config`, without drawing randomness.
    fn spin_count(&self, config: &PayoutConfig) -> Result<u32, LayoutError>;
}
