//! Spin count estimation from wager and prize.
//!
//! The prize is compared against the maximum prize for the wager, obtained by
//! scaling [`BASE_MAX_PRIZE`] linearly with `wager / BASE_WAGER`. High payouts
//! (ratio at or above [`HIGH_PRIZE_RATIO_THRESHOLD`]) always use
//! [`HIGH_PRIZE_MIN_SPINS`]; everything else gets a share of `max_spins`
//! proportional to the ratio, kept within `[1, max_spins - 1]`.

use coinfall_core::constants::{BASE_MAX_PRIZE, BASE_WAGER, HIGH_PRIZE_MIN_SPINS, HIGH_PRIZE_RATIO_THRESHOLD};
use coinfall_core::error::LayoutError;

/// Ratio of `prize` to the maximum prize at `wager`.
pub fn prize_ratio(wager: u64, prize: f64) -> Result<f64, LayoutError> {
    if wager == 0 {
        return Err(LayoutError::InvalidConfiguration(
            "wager must be positive to scale the maximum prize".into(),
        ));
    }
    let scaling_factor = wager as f64 / BASE_WAGER as f64;
    let scaled_max_prize = BASE_MAX_PRIZE as f64 * scaling_factor;
    Ok(prize / scaled_max_prize)
}

/// Number of spins the prize is spread over.
pub fn estimate_spin_count(wager: u64, prize: f64, max_spins: u32) -> Result<u32, LayoutError> {
    if max_spins < 2 {
        return Err(LayoutError::InvalidConfiguration(format!(
            "max_spins must be at least 2, got {max_spins}"
        )));
    }
    let ratio = prize_ratio(wager, prize)?;
    if ratio >= HIGH_PRIZE_RATIO_THRESHOLD {
        return Ok(HIGH_PRIZE_MIN_SPINS);
    }
    // `as` saturates: a negative product becomes 0 and is clamped up.
    let proportional = (f64::from(max_spins) * ratio).floor() as u32;
    Ok(proportional.clamp(1, max_spins - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn threshold_boundary_returns_fixed_count() {
        // 27_000 / 30_000 = 0.9 exactly
        assert_eq!(estimate_spin_count(100, 27_000.0, 10).unwrap(), 5);
    }

    #[test]
    fn above_threshold_returns_fixed_count() {
        assert_eq!(estimate_spin_count(100, 29_999.0, 10).unwrap(), 5);
        assert_eq!(estimate_spin_count(100, 90_000.0, 3).unwrap(), 5);
    }

    #[test]
    fn proportional_below_threshold() {
        // ratio 0.4 -> floor(10 * 0.4) = 4
        assert_eq!(estimate_spin_count(100, 12_000.0, 10).unwrap(), 4);
        // ratio 0.85 -> floor(8.5) = 8
        assert_eq!(estimate_spin_count(100, 25_500.0, 10).unwrap(), 8);
    }

    #[test]
    fn small_prize_clamped_to_one() {
        assert_eq!(estimate_spin_count(100, 500.0, 10).unwrap(), 1);
        assert_eq!(estimate_spin_count(100, 0.0, 10).unwrap(), 1);
    }

    #[test]
    fn proportional_never_reaches_max_spins() {
        // ratio 0.89 with max_spins 2 -> floor(1.78) = 1
        assert_eq!(estimate_spin_count(100, 26_700.0, 2).unwrap(), 1);
    }

    #[test]
    fn wager_scales_max_prize() {
        // wager 200 doubles the max prize to 60_000; 27_000 is ratio 0.45
        assert_eq!(estimate_spin_count(200, 27_000.0, 10).unwrap(), 4);
        assert!((prize_ratio(200, 27_000.0).unwrap() - 0.45).abs() < 1e-12);
    }

    #[test]
    fn zero_wager_is_invalid_configuration() {
        assert!(matches!(
            estimate_spin_count(0, 1_000.0, 10),
            Err(LayoutError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn max_spins_below_two_is_invalid_configuration() {
        assert!(matches!(
            estimate_spin_count(100, 1_000.0, 1),
            Err(LayoutError::InvalidConfiguration(_))
        ));
    }

    // --- proptest ---

    proptest! {
        #[test]
        fn estimate_in_range(
            wager in 1u64..10_000,
            prize in 0.0f64..1_000_000.0,
            max_spins in 2u32..50,
        ) {
            let n = estimate_spin_count(wager, prize, max_spins).unwrap();
            prop_assert!(n == HIGH_PRIZE_MIN_SPINS || (1..max_spins).contains(&n));
        }

        #[test]
        fn estimate_monotonic_below_threshold(
            a in 0.0f64..26_999.0,
            b in 0.0f64..26_999.0,
            max_spins in 2u32..50,
        ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let n_lo = estimate_spin_count(100, lo, max_spins).unwrap();
            let n_hi = estimate_spin_count(100, hi, max_spins).unwrap();
            prop_assert!(n_lo <= n_hi, "not monotonic: n({})={} > n({})={}", lo, n_lo, hi, n_hi);
        }
    }
}
