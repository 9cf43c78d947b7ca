//! Snapping values to the rounding unit.
//!
//! Every value the layout emits is an exact multiple of the rounding unit.
//! Ties round half away from zero, so both functions agree on the same input.
//! `unit` must be positive; that is a caller contract, not a runtime check.

/// Round a real value to the nearest multiple of `unit`.
///
/// Returns `round(value / unit) * unit`. Negative and NaN inputs snap to 0.
pub fn round_to_nearest(value: f64, unit: u64) -> u64 {
    let steps = (value / unit as f64).round();
    // `as` saturates: NaN and negatives become 0.
    (steps as u64).saturating_mul(unit)
}

/// Integer form of [`round_to_nearest`] for values already in coin units.
pub fn snap_to_unit(value: u64, unit: u64) -> u64 {
    let steps = value / unit + u64::from(value % unit >= unit - unit / 2);
    steps.saturating_mul(unit)
}

/// Whether `value` is an exact multiple of `unit`.
pub fn is_multiple_of(value: u64, unit: u64) -> bool {
    value % unit == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // --- round_to_nearest ---

    #[test]
    fn exact_multiple_unchanged() {
        assert_eq!(round_to_nearest(27_000.0, 500), 27_000);
    }

    #[test]
    fn rounds_down_below_half() {
        assert_eq!(round_to_nearest(1_249.0, 500), 1_000);
    }

    #[test]
    fn rounds_up_at_half() {
        assert_eq!(round_to_nearest(1_250.0, 500), 1_500);
    }

    #[test]
    fn negative_and_nan_snap_to_zero() {
        assert_eq!(round_to_nearest(-800.0, 500), 0);
        assert_eq!(round_to_nearest(f64::NAN, 500), 0);
    }

    #[test]
    fn unit_of_one_is_plain_rounding() {
        assert_eq!(round_to_nearest(2.4, 1), 2);
        assert_eq!(round_to_nearest(2.5, 1), 3);
    }

    // --- snap_to_unit ---

    #[test]
    fn snap_matches_examples() {
        assert_eq!(snap_to_unit(0, 500), 0);
        assert_eq!(snap_to_unit(249, 500), 0);
        assert_eq!(snap_to_unit(250, 500), 500);
        assert_eq!(snap_to_unit(749, 500), 500);
        assert_eq!(snap_to_unit(750, 500), 1_000);
    }

    #[test]
    fn snap_odd_unit_ties() {
        // unit 5: 0,1,2 -> 0 ; 3,4 -> 5 (half is 2.5)
        assert_eq!(snap_to_unit(2, 5), 0);
        assert_eq!(snap_to_unit(3, 5), 5);
    }

    #[test]
    fn multiple_check() {
        assert!(is_multiple_of(1_500, 500));
        assert!(!is_multiple_of(1_501, 500));
        assert!(is_multiple_of(0, 500));
    }

    // --- proptest ---

    proptest! {
        #[test]
        fn snap_agrees_with_float_rounding(value in 0u64..10_000_000, unit in 1u64..5_000) {
            prop_assert_eq!(snap_to_unit(value, unit), round_to_nearest(value as f64, unit));
        }

        #[test]
        fn snap_is_multiple_within_half_unit(value in 0u64..10_000_000, unit in 1u64..5_000) {
            let snapped = snap_to_unit(value, unit);
            prop_assert!(is_multiple_of(snapped, unit));
            prop_assert!(snapped.abs_diff(value) * 2 <= unit);
        }
    }
}
