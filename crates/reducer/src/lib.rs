//! Travel-Time Reducer: percentile travel times, decay-weighted cumulative
//! accessibility, temporal density / dual accessibility, and the 3D
//! accessibility result accumulator. The per-origin entry point,
//! [`reduce_origin`], has no internal threading — region-wide parallelism
//! over origins is the caller's job (see [`reduce_region`]).

pub mod accessibility;
pub mod percentile;
pub mod result;
pub mod temporal_density;

use rayon::prelude::*;

pub use accessibility::{accessible_under_cutoff_count_and_bail, reduce_accessibility, AccessibilityAccumulator};
pub use percentile::PercentileReducer;
pub use result::AccessibilityResult;
pub use temporal_density::TemporalDensity;

use decay::DecayFunction;

/// Everything one origin's reduction produces for a single destination
/// point set: percentile minutes per target, the accessibility
/// contribution, and the temporal density contribution.
#[derive(Debug, Clone)]
pub struct OriginReduction {
    pub percentile_minutes: Vec<Vec<i32>>,
    pub accessibility: AccessibilityAccumulator,
    pub temporal_density: TemporalDensity,
}

/// Reduce one origin's raw per-target iteration times (`target ->
/// iteration -> seconds`) into percentile travel times, cumulative
/// accessibility, and temporal density, for a single destination point
/// set. Pure function over its inputs — no suspension points, matching
/// the single-worker-thread-per-origin scheduling model.
pub fn reduce_origin(
    reducer: &PercentileReducer,
    raw_times_by_target: &[Vec<i32>],
    opportunities_by_target: &[f64],
    cutoffs_seconds: &[i64],
    decay: Option<&[DecayFunction]>,
) -> OriginReduction {
    let percentile_seconds: Vec<Vec<i32>> = raw_times_by_target
        .iter()
        .map(|times| reducer.percentile_seconds(times))
        .collect();

    let percentile_minutes: Vec<Vec<i32>> = percentile_seconds
        .iter()
        .map(|times| {
            times
                .iter()
                .map(|&s| {
                    if s == access_common::UNREACHED {
                        access_common::UNREACHED
                    } else {
                        s / 60
                    }
                })
                .collect()
        })
        .collect();

    let accessibility = reduce_accessibility(
        &percentile_seconds,
        opportunities_by_target,
        cutoffs_seconds,
        decay,
    );

    let mut temporal_density = TemporalDensity::new(reducer.percentiles().len());
    for (times, &opp) in percentile_seconds.iter().zip(opportunities_by_target) {
        temporal_density.record(times, opp);
    }

    OriginReduction {
        percentile_minutes,
        accessibility,
        temporal_density,
    }
}

/// Reduce every origin in `raw_times_by_origin` in parallel via
/// `rayon::par_iter`, one worker thread per origin at a time, inner
/// per-target loops sequential.
pub fn reduce_region(
    reducer: &PercentileReducer,
    raw_times_by_origin: &[Vec<Vec<i32>>],
    opportunities_by_target: &[f64],
    cutoffs_seconds: &[i64],
    decay: Option<&[DecayFunction]>,
) -> Vec<OriginReduction> {
    raw_times_by_origin
        .par_iter()
        .map(|raw_times_by_target| {
            reduce_origin(
                reducer,
                raw_times_by_target,
                opportunities_by_target,
                cutoffs_seconds,
                decay,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduce_origin_combines_all_three_outputs() {
        let reducer = PercentileReducer::new(&[50.0], 1);
        let raw_times = vec![vec![0], vec![120], vec![180]];
        let opportunities = vec![1.0, 1.0, 1.0];
        let cutoffs = [120, 180, 240];

        let result = reduce_origin(&reducer, &raw_times, &opportunities, &cutoffs, None);
        assert_eq!(result.percentile_minutes.len(), 3);
        assert_eq!(result.accessibility[0], vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn reduce_region_processes_every_origin() {
        let reducer = PercentileReducer::new(&[50.0], 1);
        let raw_times_by_origin = vec![vec![vec![0]], vec![vec![60]]];
        let opportunities = vec![1.0];
        let cutoffs = [120];

        let results = reduce_region(&reducer, &raw_times_by_origin, &opportunities, &cutoffs, None);
        assert_eq!(results.len(), 2);
    }
}
