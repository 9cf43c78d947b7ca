//! Per-spin assembly of colored combinations.
//!
//! A spin draws its combination count, splits its value into combination
//! totals, and then places the combinations one by one on an initially empty
//! board. For each combination:
//!
//! 1. pick a color not yet used on this board (any color once all are used);
//! 2. bound the coin count by value, free space, and `max_adjacent_elements`,
//!    then draw it from `[MIN_COINS_PER_COMBINATION, min(bound, MAX_COINS_PER_COMBINATION)]`;
//! 3. split the combination total into that many coin values;
//! 4. claim that many cells from the [`cluster`](crate::cluster) allocator.
//!
//! Free space is counted net of [`MIN_COINS_PER_COMBINATION`] cells reserved
//! for every combination still to be placed on the same board.

use std::collections::BTreeSet;

use coinfall_core::config::ResolvedCoinRange;
use coinfall_core::constants::{COMBINATIONS_PER_SPIN_CAP, MAX_COINS_PER_COMBINATION, MIN_COINS_PER_COMBINATION};
use coinfall_core::error::{LayoutError, LayoutWarning, SplitLevel};
use coinfall_core::types::{CellAssignment, CoinColor, Combination, SpinPlan};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::cluster::{self, ClusterQuality};
use crate::grid::Grid;
use crate::splitter::{self, SplitBounds};

/// Everything a spin assembly reads but never changes.
#[derive(Debug, Clone, Copy)]
pub struct AssemblyContext<'a> {
    pub grid: &'a Grid,
    pub coin_range: ResolvedCoinRange,
    pub max_combinations: u32,
    /// 0 means unbounded.
    pub max_adjacent_elements: u32,
    pub rounding_unit: u64,
}

/// An assembled spin plus the warnings raised while building it.
#[derive(Debug, Clone)]
pub struct SpinAssembly {
    pub spin: SpinPlan,
    pub warnings: Vec<LayoutWarning>,
}

/// Draw how many combinations a spin holds.
///
/// Uniform over `[1, min(max_combinations, COMBINATIONS_PER_SPIN_CAP))`,
/// and never more than the board can seat at the minimum size each.
pub fn combination_count<R: Rng + ?Sized>(rng: &mut R, max_combinations: u32, grid_cells: usize) -> usize {
    let upper = max_combinations.min(COMBINATIONS_PER_SPIN_CAP);
    let drawn = if upper > 1 { rng.gen_range(1..upper) } else { 1 };
    let seats = (grid_cells / MIN_COINS_PER_COMBINATION).max(1);
    (drawn as usize).min(seats)
}

/// A color not in `used`, or any color once every color is taken.
pub fn pick_color<R: Rng + ?Sized>(rng: &mut R, used: &[CoinColor]) -> CoinColor {
    let unused: Vec<CoinColor> = CoinColor::ALL.iter().copied().filter(|c| !used.contains(c)).collect();
    let pool = if unused.is_empty() { &CoinColor::ALL[..] } else { &unused[..] };
    pool.choose(rng).copied().unwrap_or(CoinColor::Red)
}

/// Upper bound on the coin count for one combination, before the hard ceiling.
///
/// `min(free_cells, max(MIN_COINS_PER_COMBINATION, ceil(total / max_coin)), max_adjacent)`.
pub fn coin_count_bound(total: u64, max_coin_value: u64, free_cells: usize, max_adjacent_elements: u32) -> usize {
    let by_value = usize::try_from(total.div_ceil(max_coin_value.max(1)))
        .unwrap_or(usize::MAX)
        .max(MIN_COINS_PER_COMBINATION);
    let allowed = match max_adjacent_elements {
        0 => usize::MAX,
        n => n as usize,
    };
    free_cells.min(by_value).min(allowed)
}

/// Bounds for splitting a spin into combination totals.
///
/// Configured coin ranges tighten the band; a derived fallback range does not.
pub fn combination_bounds(range: &ResolvedCoinRange) -> SplitBounds {
    if range.configured {
        SplitBounds::new(range.min, range.max)
    } else {
        SplitBounds::PROPORTIONAL
    }
}

/// Assemble the combinations of one spin on a fresh board.
pub fn assemble_spin<R: Rng + ?Sized>(
    rng: &mut R,
    ctx: &AssemblyContext<'_>,
    spin_index: usize,
    spin_value: u64,
) -> Result<SpinAssembly, LayoutError> {
    let mut warnings = Vec::new();
    let count = combination_count(rng, ctx.max_combinations, ctx.grid.len());

    let totals = splitter::split(rng, spin_value, count, combination_bounds(&ctx.coin_range), ctx.rounding_unit)?;
    note_inversion(&mut warnings, SplitLevel::Combinations, totals.inversion);
    debug!(spin = spin_index, value = spin_value, totals = ?totals.parts, "split spin into combinations");

    let mut claimed = BTreeSet::new();
    let mut used_colors = Vec::with_capacity(count);
    let mut combinations = Vec::with_capacity(count);

    for (j, &total) in totals.parts.iter().enumerate() {
        let color = pick_color(rng, &used_colors);
        used_colors.push(color);

        let still_to_place = count - j - 1;
        let free = ctx.grid.len() - claimed.len();
        let space = free.saturating_sub(still_to_place * MIN_COINS_PER_COMBINATION);
        let upper = coin_count_bound(total, ctx.coin_range.max, space, ctx.max_adjacent_elements)
            .min(MAX_COINS_PER_COMBINATION);

        let coin_count = if upper >= MIN_COINS_PER_COMBINATION {
            rng.gen_range(MIN_COINS_PER_COMBINATION..=upper)
        } else {
            let w = LayoutWarning::ResourceExhaustion {
                spin: spin_index,
                requested: MIN_COINS_PER_COMBINATION,
                available: upper,
            };
            warn!(%w, "combination below minimum size");
            warnings.push(w);
            upper.max(1)
        };

        let values = splitter::split(
            rng,
            total,
            coin_count,
            SplitBounds::new(ctx.coin_range.min, ctx.coin_range.max),
            ctx.rounding_unit,
        )?;
        note_inversion(&mut warnings, SplitLevel::Cells, values.inversion);

        let outcome = cluster::allocate(rng, ctx.grid, coin_count, &claimed);
        match outcome.quality {
            ClusterQuality::Connected => {}
            ClusterQuality::Padded { connected } => {
                let w = LayoutWarning::ClusteringDegraded { spin: spin_index, requested: coin_count, connected };
                warn!(%w, "combination padded with disconnected cells");
                warnings.push(w);
            }
            ClusterQuality::Truncated { available } => {
                let w = LayoutWarning::ResourceExhaustion { spin: spin_index, requested: coin_count, available };
                warn!(%w, "board ran out of free cells");
                warnings.push(w);
            }
        }
        claimed.extend(outcome.cells.iter().copied());

        debug!(
            spin = spin_index,
            combination = j,
            %color,
            total,
            coins = coin_count,
            cells = ?outcome.cells,
            "placed combination"
        );

        combinations.push(Combination {
            color,
            total_value: total,
            cells: place_values(&outcome.cells, &values.parts, color),
        });
    }

    Ok(SpinAssembly {
        spin: SpinPlan { spin_value, combinations },
        warnings,
    })
}

/// Zip cells with values. Values left over after a truncated allocation are
/// folded into the last placed cell so the combination still sums to its total.
fn place_values(cells: &[usize], values: &[u64], color: CoinColor) -> Vec<CellAssignment> {
    let mut placed: Vec<CellAssignment> = cells
        .iter()
        .zip(values)
        .map(|(&index, &value)| CellAssignment { index, value, color })
        .collect();
    let overflow: u64 = values.iter().skip(placed.len()).sum();
    if let Some(last) = placed.last_mut() {
        last.value += overflow;
    }
    placed
}

fn note_inversion(warnings: &mut Vec<LayoutWarning>, level: SplitLevel, inversion: Option<(u64, u64)>) {
    if let Some((min, max)) = inversion {
        let w = LayoutWarning::BoundInversion { level, min, max };
        warn!(%w, "split band inverted");
        warnings.push(w);
    }
}
