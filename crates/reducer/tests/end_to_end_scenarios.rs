//! Integration test: drive the reducer crate's public API end-to-end for
//! the worked accessibility scenarios, the way `reduce_region` is actually
//! called by an analysis driver — construct a `PercentileReducer`, feed
//! raw per-iteration travel times through `reduce_origin`, accumulate into
//! an `AccessibilityResult`, and check the emitted, rounded result.

use access_common::UNREACHED;
use decay::DecayFunction;
use reducer::{reduce_origin, AccessibilityResult, PercentileReducer, TemporalDensity};

#[test]
fn point_estimate_no_variation_produces_monotone_accessibility() {
    // percentiles=[50], one iteration, four targets with raw times
    // [0, 120, 180, INT_MAX], one opportunity each, cutoffs at 2/3/4
    // minutes. Each cutoff test is strict `<`, so t=120 clears the 3 and
    // 4 minute cutoffs but not the 2 minute one: [1, 2, 3].
    let reducer = PercentileReducer::new(&[50.0], 1);
    let raw_times_by_target = vec![vec![0], vec![120], vec![180], vec![UNREACHED]];
    let opportunities_by_target = vec![1.0; 4];
    let cutoffs_seconds = [120, 180, 240];

    let reduction = reduce_origin(
        &reducer,
        &raw_times_by_target,
        &opportunities_by_target,
        &cutoffs_seconds,
        None,
    );

    let mut result = AccessibilityResult::new(1, 1, 3);
    result.merge(0, &reduction.accessibility);
    let emitted = result.emit().unwrap();
    assert_eq!(emitted[0][0], vec![1, 2, 3]);
}

#[test]
fn crafted_monotonicity_break_is_rejected_at_emit() {
    let mut result = AccessibilityResult::new(1, 2, 1);
    result.add(0, 0, 0, 3.0);
    result.add(0, 1, 0, 5.0); // A[0][1][0] > A[0][0][0]: invalid.
    let err = result.emit().unwrap_err();
    assert!(matches!(err, access_common::AccessError::InvariantViolation(_)));
}

#[test]
fn decay_weighted_reduction_never_breaks_cutoff_monotonicity() {
    let reducer = PercentileReducer::new(&[50.0, 90.0], 3);
    let raw_times_by_target = vec![vec![30, 400, 90], vec![700, 50, 600]];
    let opportunities_by_target = vec![2.0, 3.0];
    let cutoffs_seconds = [300, 600, 900];
    let decay = [
        DecayFunction::Step { cutoff_seconds: 300.0 }.new_checked().unwrap(),
        DecayFunction::Step { cutoff_seconds: 600.0 }.new_checked().unwrap(),
        DecayFunction::Step { cutoff_seconds: 900.0 }.new_checked().unwrap(),
    ];

    let reduction = reduce_origin(
        &reducer,
        &raw_times_by_target,
        &opportunities_by_target,
        &cutoffs_seconds,
        Some(&decay),
    );

    let mut result = AccessibilityResult::new(1, 2, 3);
    result.merge(0, &reduction.accessibility);
    result.emit().expect("step decay should never break monotonicity");
}

#[test]
fn dual_accessibility_reports_minutes_to_clear_threshold() {
    // opportunitiesPerMinute[0][0] = [0,0,5,7,0,...], threshold=10: the
    // cumulative count only reaches 10 partway through minute 3, so the
    // first whole minute it is satisfied as of is minute 4.
    let mut density = TemporalDensity::new(1);
    density.record(&[2 * 60], 5.0);
    density.record(&[3 * 60], 7.0);
    assert_eq!(density.dual_accessibility(0, 10.0), 4);
}
