//! Accessibility reducer: cumulative opportunity counts reachable under
//! configured cutoffs, with optional decay weighting.
//!
//! The literal hard-cutoff test ("< cutoff seconds, add the full
//! opportunity count") is the [`DecayFunction::Step`] special case of
//! decay-weighted accumulation; passing `None` for `decay` selects it
//! directly and enables the count-and-bail fast path, avoiding a sort per
//! target the way the generic decay-weighted path needs one.

use access_common::UNREACHED;
use decay::DecayFunction;

use crate::percentile::PercentileReducer;

/// Per-(percentile, cutoff) accumulator for a single target set's
/// contribution to one origin's accessibility result. Indexed
/// `[percentile][cutoff]`.
pub type AccessibilityAccumulator = Vec<Vec<f64>>;

fn zeroed(n_percentiles: usize, n_cutoffs: usize) -> AccessibilityAccumulator {
    vec![vec![0.0; n_cutoffs]; n_percentiles]
}

/// Accumulate one origin's accessibility contribution using already-reduced
/// percentile travel times (in seconds, `UNREACHED` propagated) and a
/// matching opportunity count per target.
///
/// `cutoffs_seconds` gives the cutoff boundary (exclusive, per the
/// strict `<` test) for each cutoff bucket. `decay`, if provided, must have
/// one entry per cutoff bucket and is evaluated at the target's percentile
/// travel time instead of the hard `< cutoff` test.
pub fn reduce_accessibility(
    percentile_seconds_by_target: &[Vec<i32>],
    opportunities_by_target: &[f64],
    cutoffs_seconds: &[i64],
    decay: Option<&[DecayFunction]>,
) -> AccessibilityAccumulator {
    let n_targets = percentile_seconds_by_target.len();
    debug_assert_eq!(opportunities_by_target.len(), n_targets);
    if let Some(d) = decay {
        debug_assert_eq!(d.len(), cutoffs_seconds.len());
    }

    let n_percentiles = percentile_seconds_by_target
        .first()
        .map(|t| t.len())
        .unwrap_or(0);
    let mut acc = zeroed(n_percentiles, cutoffs_seconds.len());

    for target in 0..n_targets {
        let opp = opportunities_by_target[target];
        if opp == 0.0 {
            continue;
        }
        let times = &percentile_seconds_by_target[target];
        for (i, &t) in times.iter().enumerate() {
            if t == UNREACHED {
                continue;
            }
            for (j, &cutoff) in cutoffs_seconds.iter().enumerate() {
                let weight = match decay {
                    Some(functions) => functions[j].compute_weight(t as f64),
                    None => {
                        if (t as i64) < cutoff {
                            1.0
                        } else {
                            0.0
                        }
                    }
                };
                if weight > 0.0 {
                    acc[i][j] += opp * weight;
                }
            }
        }
    }

    acc
}

/// Count-and-bail fast path for the hard-cutoff (no-decay) case: for each
/// percentile, count how many of a target's raw iteration times fall under
/// `cutoff_seconds`, bailing as soon as the count reaches
/// `reducer.min_counts()[i]` (at which point the `p_i`-th percentile of
/// travel time is known to be under the cutoff without sorting). Returns
/// one bool per percentile: whether that percentile's travel time is
/// reachable under `cutoff_seconds`.
pub fn accessible_under_cutoff_count_and_bail(
    reducer: &PercentileReducer,
    raw_times: &[i32],
    cutoff_seconds: i64,
) -> Vec<bool> {
    let min_counts = reducer.min_counts();
    let mut count = 0usize;
    for &t in raw_times {
        if t != UNREACHED && (t as i64) < cutoff_seconds {
            count += 1;
        }
    }
    min_counts.iter().map(|&min| count >= min).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_one_point_estimate_no_variation() {
        // percentiles=[50], one iteration, times=[0,120,180,INT_MAX],
        // cutoffsMinutes=[2,3,4], opportunity per target = 1. Each strict
        // `<` test is independent per cutoff: t=0 clears all three cutoffs,
        // t=120 clears 3min/4min but not the 2min cutoff (120s is not <
        // 120s), t=180 clears only the 4min cutoff, and UNREACHED never
        // counts — giving the monotone non-decreasing sequence [1, 2, 3].
        let reducer = PercentileReducer::new(&[50.0], 1);
        let raw_times = [[0i32], [120], [180], [UNREACHED]];
        let percentile_seconds: Vec<Vec<i32>> = raw_times
            .iter()
            .map(|t| reducer.percentile_seconds(t))
            .collect();
        let opportunities = vec![1.0; 4];
        let cutoffs_seconds = [120, 180, 240];

        let acc = reduce_accessibility(&percentile_seconds, &opportunities, &cutoffs_seconds, None);
        assert_eq!(acc[0], vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn zero_opportunity_targets_are_skipped() {
        let percentile_seconds = vec![vec![10i32]];
        let opportunities = vec![0.0];
        let acc = reduce_accessibility(&percentile_seconds, &opportunities, &[60], None);
        assert_eq!(acc[0][0], 0.0);
    }

    #[test]
    fn count_and_bail_matches_slow_path_for_step_decay() {
        let reducer = PercentileReducer::new(&[50.0, 90.0], 5);
        let raw = [10, 200, 30, 400, 50];
        let cutoff_seconds = 100i64;

        let percentile_seconds = reducer.percentile_seconds(&raw);
        let slow: Vec<bool> = percentile_seconds
            .iter()
            .map(|&t| t != UNREACHED && (t as i64) < cutoff_seconds)
            .collect();

        let fast = accessible_under_cutoff_count_and_bail(&reducer, &raw, cutoff_seconds);
        assert_eq!(fast, slow);
    }
}
