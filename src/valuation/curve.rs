//! Score-to-price curve.
//!
//! Linear up to the median score, convex quadratic above it:
//!
//! ```text
//! score <= 50:  units = score / 50                  (0 .. 1)
//! score >  50:  units = 1 + 99 * ((score - 50) / 50)^2   (1 .. 100)
//! ```
//!
//! Both segments evaluate to exactly 1 unit at the breakpoint, so the curve
//! is continuous and non-decreasing on `[0, 100]`. Prices are `units` times
//! the caller's base price per unit.

/// Score at which the linear segment hands over to the quadratic one
pub const CURVE_BREAKPOINT: f64 = 50.0;

/// Units awarded at a perfect score
pub const MAX_UNITS: f64 = 100.0;

/// Default base price per unit, in KRW
pub const DEFAULT_BASE_PRICE_UNIT: f64 = 4_500_000.0;

/// Map a final score to price units. Scores outside `[0, 100]` are clamped;
/// NaN is treated as 0.
pub fn score_to_units(score: f64) -> f64 {
    let score = clamp_score(score);
    if score <= CURVE_BREAKPOINT {
        linear_segment(score)
    } else {
        quadratic_segment(score)
    }
}

/// Map a final score to an amount in base currency, rounded to the nearest
/// whole unit. A negative or non-finite base price yields 0.
pub fn score_to_price(score: f64, base_price_unit: f64) -> u64 {
    if !base_price_unit.is_finite() || base_price_unit <= 0.0 {
        return 0;
    }
    (score_to_units(score) * base_price_unit).round() as u64
}

fn linear_segment(score: f64) -> f64 {
    score / CURVE_BREAKPOINT
}

fn quadratic_segment(score: f64) -> f64 {
    let t = (score - CURVE_BREAKPOINT) / (100.0 - CURVE_BREAKPOINT);
    1.0 + (MAX_UNITS - 1.0) * t * t
}

fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_anchor_points() {
        assert_eq!(score_to_units(0.0), 0.0);
        assert_eq!(score_to_units(50.0), 1.0);
        assert_eq!(score_to_units(100.0), 100.0);
    }

    #[test]
    fn test_price_at_median_and_top() {
        assert_eq!(score_to_price(50.0, 4_500_000.0), 4_500_000);
        assert_eq!(score_to_price(100.0, 4_500_000.0), 450_000_000);
        assert_eq!(score_to_price(0.0, 4_500_000.0), 0);
    }

    #[test]
    fn test_linear_segment() {
        // 25 -> half a unit
        assert_eq!(score_to_price(25.0, 4_500_000.0), 2_250_000);
    }

    #[test]
    fn test_quadratic_segment() {
        // 75 -> 1 + 99 * 0.25 = 25.75 units
        assert_eq!(score_to_units(75.0), 25.75);
        assert_eq!(score_to_price(75.0, 4_500_000.0), 115_875_000);
    }

    #[test]
    fn test_segments_agree_at_breakpoint() {
        let left = linear_segment(CURVE_BREAKPOINT);
        let right = quadratic_segment(CURVE_BREAKPOINT);
        assert!((left - right).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_range_scores_clamped() {
        assert_eq!(score_to_units(-10.0), 0.0);
        assert_eq!(score_to_units(150.0), 100.0);
        assert_eq!(score_to_units(f64::NAN), 0.0);
    }

    #[test]
    fn test_invalid_base_price_yields_zero() {
        assert_eq!(score_to_price(80.0, -1.0), 0);
        assert_eq!(score_to_price(80.0, 0.0), 0);
        assert_eq!(score_to_price(80.0, f64::INFINITY), 0);
    }

    proptest! {
        #[test]
        fn prop_price_is_monotonic(a in 0.0f64..=100.0, b in 0.0f64..=100.0, base in 1.0f64..1e9) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(score_to_price(lo, base) <= score_to_price(hi, base));
        }

        #[test]
        fn prop_units_within_bounds(score in -50.0f64..150.0) {
            let units = score_to_units(score);
            prop_assert!((0.0..=MAX_UNITS).contains(&units));
        }

        #[test]
        fn prop_continuous_near_breakpoint(eps in 0.0f64..1e-6) {
            let below = score_to_units(CURVE_BREAKPOINT - eps);
            let above = score_to_units(CURVE_BREAKPOINT + eps);
            prop_assert!((above - below).abs() < 1e-6);
        }
    }
}
