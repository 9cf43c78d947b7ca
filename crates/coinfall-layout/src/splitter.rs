//! Generate-and-test splitting of a total into rounded parts.
//!
//! One attempt draws every part but the last from a proportional band
//! around the running average: `[avg * 80%, avg * 120%]`, tightened by the
//! caller's floor and ceiling. Each draw is snapped to the rounding unit and
//! subtracted from the remainder; the last part takes whatever remains.
//! An attempt is accepted only if the parts sum exactly to the total and none
//! is negative. Otherwise the whole split is discarded and redrawn, up to
//! [`SPLIT_MAX_ATTEMPTS`] times.
//!
//! When the floor lies above the band's upper edge the floor is clamped down
//! to it, so the draw collapses onto the upper edge.

use coinfall_core::constants::{SPLIT_BAND_HIGH_PCT, SPLIT_BAND_LOW_PCT, SPLIT_MAX_ATTEMPTS};
use coinfall_core::error::LayoutError;
use coinfall_core::rounding::snap_to_unit;
use rand::Rng;
use tracing::trace;

/// Per-part floor and ceiling applied on top of the proportional band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitBounds {
    pub floor: u64,
    /// `None` leaves the band's upper edge unbounded.
    pub ceiling: Option<u64>,
}

impl SplitBounds {
    /// Pure proportional band, no coin-value limits.
    pub const PROPORTIONAL: Self = Self { floor: 0, ceiling: None };

    pub fn new(floor: u64, ceiling: u64) -> Self {
        Self { floor, ceiling: Some(ceiling) }
    }
}

/// An accepted split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub parts: Vec<u64>,
    /// Attempts drawn, including the accepted one.
    pub attempts: u32,
    /// First inverted band `(min, max)` met in the accepted attempt.
    pub inversion: Option<(u64, u64)>,
}

/// Split `total` into `parts` multiples of `unit` summing exactly to `total`.
pub fn split<R: Rng + ?Sized>(
    rng: &mut R,
    total: u64,
    parts: usize,
    bounds: SplitBounds,
    unit: u64,
) -> Result<Split, LayoutError> {
    split_with_limit(rng, total, parts, bounds, unit, SPLIT_MAX_ATTEMPTS)
}

/// [`split`] with an explicit attempt ceiling.
pub fn split_with_limit<R: Rng + ?Sized>(
    rng: &mut R,
    total: u64,
    parts: usize,
    bounds: SplitBounds,
    unit: u64,
    max_attempts: u32,
) -> Result<Split, LayoutError> {
    if parts == 0 {
        return Err(LayoutError::InvalidConfiguration(format!(
            "cannot split {total} into zero parts"
        )));
    }
    if unit == 0 {
        return Err(LayoutError::InvalidConfiguration("rounding unit must be positive".into()));
    }

    for attempt in 1..=max_attempts {
        match draw(rng, total, parts, bounds, unit) {
            Some((values, inversion)) => {
                return Ok(Split { parts: values, attempts: attempt, inversion });
            }
            None => trace!(total, parts, attempt, "split attempt rejected"),
        }
    }

    Err(LayoutError::SplitNonConvergence { total, parts, attempts: max_attempts })
}

/// Inclusive sampling band for one part given the running average.
///
/// Returns `(min, max, inverted)`; when inverted, `min` has already been
/// clamped down to `max`.
pub fn band(average: u64, bounds: SplitBounds) -> (u64, u64, bool) {
    let low = average.saturating_mul(SPLIT_BAND_LOW_PCT) / 100;
    let high = average.saturating_mul(SPLIT_BAND_HIGH_PCT) / 100;
    let min = bounds.floor.max(low);
    let max = bounds.ceiling.map_or(high, |c| c.min(high));
    if min > max {
        (max, max, true)
    } else {
        (min, max, false)
    }
}

/// One attempt. `None` means the attempt must be discarded.
fn draw<R: Rng + ?Sized>(
    rng: &mut R,
    total: u64,
    parts: usize,
    bounds: SplitBounds,
    unit: u64,
) -> Option<(Vec<u64>, Option<(u64, u64)>)> {
    let mut values = Vec::with_capacity(parts);
    let mut remaining = total;
    let mut inversion = None;

    for i in 0..parts - 1 {
        let average = remaining / (parts - i) as u64;
        let (min, max, inverted) = band(average, bounds);
        if inverted && inversion.is_none() {
            inversion = Some((bounds.floor, max));
        }
        let sample = rng.gen_range(min..=max);
        let value = snap_to_unit(sample, unit);
        remaining = remaining.checked_sub(value)?;
        values.push(value);
    }

    values.push(snap_to_unit(remaining, unit));
    (values.iter().sum::<u64>() == total).then_some((values, inversion))
}
