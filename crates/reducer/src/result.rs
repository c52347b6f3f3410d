//! Accessibility Result: the three-dimensional `[pointset][percentile]
//! [cutoff]` accumulator with monotonicity invariants enforced at emit.

use access_common::{round_half_away_from_zero, AccessError, AccessResult};

/// Accumulates cumulative accessibility during reduction (`f64`, never
/// rounded) and rounds exactly once, at [`Self::emit`]. Never accumulate
/// integers; fractional opportunity mass only ever gets truncated at the
/// emission boundary.
#[derive(Debug, Clone)]
pub struct AccessibilityResult {
    n_pointsets: usize,
    n_percentiles: usize,
    n_cutoffs: usize,
    values: Vec<f64>,
}

impl AccessibilityResult {
    pub fn new(n_pointsets: usize, n_percentiles: usize, n_cutoffs: usize) -> Self {
        Self {
            n_pointsets,
            n_percentiles,
            n_cutoffs,
            values: vec![0.0; n_pointsets * n_percentiles * n_cutoffs],
        }
    }

    fn index(&self, pointset: usize, percentile: usize, cutoff: usize) -> usize {
        (pointset * self.n_percentiles + percentile) * self.n_cutoffs + cutoff
    }

    pub fn get(&self, pointset: usize, percentile: usize, cutoff: usize) -> f64 {
        self.values[self.index(pointset, percentile, cutoff)]
    }

    pub fn add(&mut self, pointset: usize, percentile: usize, cutoff: usize, amount: f64) {
        let i = self.index(pointset, percentile, cutoff);
        self.values[i] += amount;
    }

    /// Merge in a per-pointset `[percentile][cutoff]` accumulator produced
    /// by [`crate::accessibility::reduce_accessibility`] for one origin's
    /// contribution (e.g. one destination set's worth of targets).
    pub fn merge(&mut self, pointset: usize, accumulator: &[Vec<f64>]) {
        for (i, row) in accumulator.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                self.add(pointset, i, j, v);
            }
        }
    }

    /// Round every cell to an integer (round-half-away-from-zero) and
    /// check the monotonicity invariants:
    ///
    /// - non-decreasing along the cutoff axis (more time budget never
    ///   reduces reachable opportunities),
    /// - non-increasing along the percentile axis (a higher travel-time
    ///   percentile is never easier to reach within a given cutoff).
    ///
    /// Fails fast with `InvariantViolation` — this is a bug-detection
    /// guard, not a recoverable I/O error.
    pub fn emit(&self) -> AccessResult<Vec<Vec<Vec<i64>>>> {
        let mut out = vec![vec![vec![0i64; self.n_cutoffs]; self.n_percentiles]; self.n_pointsets];

        for p in 0..self.n_pointsets {
            for i in 0..self.n_percentiles {
                for j in 0..self.n_cutoffs {
                    out[p][i][j] = round_half_away_from_zero(self.get(p, i, j));
                }
            }

            for i in 0..self.n_percentiles {
                for j in 1..self.n_cutoffs {
                    if out[p][i][j] < out[p][i][j - 1] {
                        return Err(AccessError::InvariantViolation(format!(
                            "pointset {p} percentile {i}: A[{j}]={} < A[{}]={}",
                            out[p][i][j],
                            j - 1,
                            out[p][i][j - 1]
                        )));
                    }
                }
            }

            for i in 1..self.n_percentiles {
                for j in 0..self.n_cutoffs {
                    if out[p][i][j] > out[p][i - 1][j] {
                        return Err(AccessError::InvariantViolation(format!(
                            "pointset {p} cutoff {j}: A[percentile {i}]={} > A[percentile {}]={}",
                            out[p][i][j],
                            i - 1,
                            out[p][i - 1][j]
                        )));
                    }
                }
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_rounded_values_when_monotone() {
        let mut result = AccessibilityResult::new(1, 1, 3);
        result.add(0, 0, 0, 1.4);
        result.add(0, 0, 1, 2.6);
        result.add(0, 0, 2, 2.6);
        let out = result.emit().unwrap();
        assert_eq!(out[0][0], vec![1, 3, 3]);
    }

    #[test]
    fn monotonicity_break_along_cutoff_axis_fails() {
        let mut result = AccessibilityResult::new(1, 1, 2);
        result.add(0, 0, 0, 5.0);
        result.add(0, 0, 1, 2.0);
        assert!(result.emit().is_err());
    }

    #[test]
    fn monotonicity_break_along_percentile_axis_fails() {
        // A[0][1][0] > A[0][0][0]: higher percentile reaches more
        // opportunities, which cannot happen.
        let mut result = AccessibilityResult::new(1, 2, 1);
        result.add(0, 0, 0, 3.0);
        result.add(0, 1, 0, 5.0);
        assert!(result.emit().is_err());
    }

    #[test]
    fn merge_accumulates_a_subreducer_contribution() {
        let mut result = AccessibilityResult::new(1, 1, 2);
        result.merge(0, &[vec![1.0, 2.0]]);
        result.merge(0, &[vec![0.5, 0.5]]);
        assert_eq!(result.get(0, 0, 0), 1.5);
        assert_eq!(result.get(0, 0, 1), 2.5);
    }
}
