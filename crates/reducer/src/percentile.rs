//! Percentile reducer: per-target consumer of raw per-iteration travel
//! times, emitting non-interpolated percentile travel times.

use access_common::UNREACHED;

/// Precomputed percentile indices for a fixed `(percentiles, n_iterations)`
/// pair, reused across every target and origin in an analysis.
#[derive(Debug, Clone)]
pub struct PercentileReducer {
    percentiles: Vec<f64>,
    n_iterations: usize,
    /// `idx_i = round(p_i * N / 100)` clamped to `[0, N-1]`.
    indices: Vec<usize>,
}

impl PercentileReducer {
    pub fn new(percentiles: &[f64], n_iterations: usize) -> Self {
        let n = n_iterations.max(1);
        let indices = percentiles
            .iter()
            .map(|&p| percentile_index(p, n))
            .collect();
        Self {
            percentiles: percentiles.to_vec(),
            n_iterations: n,
            indices,
        }
    }

    pub fn percentiles(&self) -> &[f64] {
        &self.percentiles
    }

    pub fn n_iterations(&self) -> usize {
        self.n_iterations
    }

    /// Non-interpolated percentile travel times in **seconds** for one
    /// target, given that target's raw per-iteration times (any order,
    /// `UNREACHED` for unreachable iterations). Sorts a working copy
    /// ascending; `UNREACHED` propagates monotonically: once a percentile
    /// index lands on `UNREACHED`, every higher percentile at the same
    /// target is `UNREACHED` too (the array is sorted ascending, so
    /// `UNREACHED`, being `i32::MAX`, only ever appears at the tail).
    ///
    /// If `n_iterations == 1` (non-transit access legs), the single value
    /// is replicated across every configured percentile.
    pub fn percentile_seconds(&self, raw_times: &[i32]) -> Vec<i32> {
        if self.n_iterations == 1 {
            let only = raw_times.first().copied().unwrap_or(UNREACHED);
            return vec![only; self.percentiles.len()];
        }

        let mut sorted = raw_times.to_vec();
        sorted.sort_unstable();

        self.indices
            .iter()
            .map(|&idx| sorted.get(idx).copied().unwrap_or(UNREACHED))
            .collect()
    }

    /// Same as [`Self::percentile_seconds`] but converted to whole minutes
    /// (integer floor division), or `UNREACHED` if the slot was unreachable.
    pub fn percentile_minutes(&self, raw_times: &[i32]) -> Vec<i32> {
        self.percentile_seconds(raw_times)
            .into_iter()
            .map(|s| if s == UNREACHED { UNREACHED } else { s / 60 })
            .collect()
    }

    /// `min_count_i = floor((N-1) * p_i / 100) + 1`: the number of
    /// iterations that must fall under a cutoff for the `p_i`-th percentile
    /// of travel time to also fall under that cutoff. Used by the
    /// count-and-bail accessibility fast path.
    pub fn min_counts(&self) -> Vec<usize> {
        let n = self.n_iterations as f64;
        self.percentiles
            .iter()
            .map(|&p| (((n - 1.0) * p / 100.0).floor() as i64 + 1).max(0) as usize)
            .collect()
    }
}

/// `idx_i = round(p_i * N / 100)` clamped to `[0, N-1]`.
fn percentile_index(p: f64, n: usize) -> usize {
    let raw = (p * n as f64 / 100.0).round() as i64;
    raw.clamp(0, n as i64 - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn n_one_replicates_single_value() {
        let reducer = PercentileReducer::new(&[10.0, 50.0, 90.0], 1);
        let result = reducer.percentile_seconds(&[42]);
        assert_eq!(result, vec![42, 42, 42]);
    }

    #[test]
    fn percentile_zero_is_minimum_and_100_is_maximum() {
        let reducer = PercentileReducer::new(&[0.0, 100.0], 5);
        let times = [50, 10, 40, 20, 30];
        let result = reducer.percentile_seconds(&times);
        assert_eq!(result[0], 10);
        assert_eq!(result[1], 50);
    }

    #[test]
    fn unreached_propagates_to_higher_percentiles() {
        let reducer = PercentileReducer::new(&[50.0, 99.0], 4);
        let times = [10, 20, UNREACHED, UNREACHED];
        let result = reducer.percentile_seconds(&times);
        assert_eq!(result[1], UNREACHED);
    }

    #[test]
    fn worked_example_scenario_one() {
        // percentiles=[50], one iteration, times include UNREACHED.
        let reducer = PercentileReducer::new(&[50.0], 1);
        let result = reducer.percentile_seconds(&[0]);
        assert_eq!(result, vec![0]);
    }

    #[test]
    fn min_counts_match_formula() {
        let reducer = PercentileReducer::new(&[50.0], 5);
        // floor((5-1)*50/100) + 1 = floor(2.0) + 1 = 3
        assert_eq!(reducer.min_counts(), vec![3]);
    }
}
