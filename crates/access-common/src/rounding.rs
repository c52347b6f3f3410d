//! Rounding conventions applied only at result-emission boundaries.
//!
//! Internal accumulators stay `f64`; rounding to integers happens exactly
//! once, when a result crosses out of the accumulation phase.

/// Round-half-away-from-zero, matching `f64::round`'s native behavior.
/// Used for all emitted integer counts (accessibility, temporal density,
/// grid binary I/O) per the workspace's documented rounding convention.
pub fn round_half_away_from_zero(value: f64) -> i64 {
    value.round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_half_away_from_zero(0.5), 1);
        assert_eq!(round_half_away_from_zero(-0.5), -1);
        assert_eq!(round_half_away_from_zero(2.5), 3);
        assert_eq!(round_half_away_from_zero(1.4), 1);
        assert_eq!(round_half_away_from_zero(1.6), 2);
    }
}
