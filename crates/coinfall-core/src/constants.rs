//! Layout constants. All monetary values are integer coin units.

/// Default quantum every emitted value is snapped to.
pub const DEFAULT_ROUNDING_UNIT: u64 = 500;

/// Wager the prize scaling heuristic is calibrated against.
pub const BASE_WAGER: u64 = 100;

/// Maximum prize at [`BASE_WAGER`]; scales linearly with the wager.
pub const BASE_MAX_PRIZE: u64 = 30_000;

/// Prize ratio (prize / scaled max prize) at or above which a payout counts as "high".
pub const HIGH_PRIZE_RATIO_THRESHOLD: f64 = 0.9;

/// Fixed spin count used for high payouts.
pub const HIGH_PRIZE_MIN_SPINS: u32 = 5;

/// Divisor for the derived coin floor when no range matches the wager.
///
/// Equal to the smallest legal `max_spins`.
pub const MIN_SPINS: u32 = 2;

/// Minimum adjacency threshold: a combination occupies at least this many cells.
pub const MIN_COINS_PER_COMBINATION: usize = 3;

/// Hard ceiling on cells per combination, regardless of configuration.
pub const MAX_COINS_PER_COMBINATION: usize = 7;

/// Exclusive upper bound on combinations drawn per spin.
pub const COMBINATIONS_PER_SPIN_CAP: u32 = 4;

/// Lower edge of the proportional split band, in percent of the running average.
pub const SPLIT_BAND_LOW_PCT: u64 = 80;

/// Upper edge of the proportional split band, in percent of the running average.
pub const SPLIT_BAND_HIGH_PCT: u64 = 120;

/// Whole-split resampling attempts before a split is declared non-convergent.
pub const SPLIT_MAX_ATTEMPTS: u32 = 10_000;

/// Independent breadth-first trials per cluster allocation.
pub const MAX_CLUSTER_TRIALS: u32 = 10;

/// Rows of the reference board.
pub const GRID_ROWS: usize = 3;

/// Columns of the reference board.
pub const GRID_COLUMNS: usize = 5;
