//! Decay functions: monotone non-increasing weighting of opportunities by
//! travel time. A closed, tagged-variant enum rather than `dyn Trait` — the
//! set of shapes is fixed by configuration, not extensible at runtime.

use std::f64::consts::PI;

use access_common::{AccessError, AccessResult};
use serde::{Deserialize, Serialize};

/// Number of seconds swept by [`DecayFunction::validate`]'s self-test.
const VALIDATION_HORIZON_SECONDS: f64 = 7200.0;
const VALIDATION_STEP_SECONDS: f64 = 1.0;
const ZERO_TOLERANCE: f64 = 1e-4;

/// A monotone non-increasing weighting of opportunity value against travel
/// time, tagged by shape. Construct with [`DecayFunction::new_checked`] to
/// run the self-validation contract, or deserialize from the JSON
/// discriminator shape `{"type": "...", ...params}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DecayFunction {
    /// 1 if `t < cutoff`, else 0.
    Step { cutoff_seconds: f64 },
    /// 1 up to `cutoff - width`, linear ramp to 0 at `cutoff + width`.
    Linear { cutoff_seconds: f64, width_seconds: f64 },
    /// `exp(-ln(2) * t / halflife)`, effectively zero once `weight < 1e-4`.
    Exponential { halflife_seconds: f64 },
    /// `1 / (1 + exp((t - cutoff) * pi / (std * sqrt(3))))`.
    Logistic { cutoff_seconds: f64, std_seconds: f64 },
    /// A symmetric rolloff around cutoff (alias shape of logistic with a
    /// width parameter in the same spirit as [`DecayFunction::Linear`]).
    Sigmoid { cutoff_seconds: f64, width_seconds: f64 },
}

impl DecayFunction {
    /// Construct and immediately validate the pointwise contract described
    /// in `validate`. Returns `BadConfig` if any invariant fails.
    pub fn new_checked(self) -> AccessResult<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Weight in `[0, 1]` for a travel time of `t` seconds. Pure: calling
    /// this twice with the same inputs always yields the same result.
    pub fn compute_weight(&self, t: f64) -> f64 {
        match *self {
            DecayFunction::Step { cutoff_seconds } => {
                if t < cutoff_seconds {
                    1.0
                } else {
                    0.0
                }
            }
            DecayFunction::Linear {
                cutoff_seconds,
                width_seconds,
            } => {
                let ramp_start = cutoff_seconds - width_seconds;
                let ramp_end = cutoff_seconds + width_seconds;
                if t <= ramp_start {
                    1.0
                } else if t >= ramp_end {
                    0.0
                } else {
                    1.0 - (t - ramp_start) / (ramp_end - ramp_start)
                }
            }
            DecayFunction::Exponential { halflife_seconds } => {
                (-std::f64::consts::LN_2 * t / halflife_seconds).exp()
            }
            DecayFunction::Logistic {
                cutoff_seconds,
                std_seconds,
            } => {
                let x = (t - cutoff_seconds) * PI / (std_seconds * 3f64.sqrt());
                1.0 / (1.0 + x.exp())
            }
            DecayFunction::Sigmoid {
                cutoff_seconds,
                width_seconds,
            } => {
                let x = (t - cutoff_seconds) / width_seconds.max(1.0);
                1.0 / (1.0 + x.exp())
            }
        }
    }

    /// Seconds at which this function's weight is considered zero. Always
    /// falls in `(cutoff, 7200]` relative to the function's own cutoff-like
    /// parameter.
    pub fn reaches_zero_at(&self) -> f64 {
        match *self {
            DecayFunction::Step { cutoff_seconds } => cutoff_seconds,
            DecayFunction::Linear {
                cutoff_seconds,
                width_seconds,
            } => cutoff_seconds + width_seconds,
            DecayFunction::Exponential { halflife_seconds } => {
                find_zero_crossing(self, 0.0, halflife_seconds * 40.0)
            }
            DecayFunction::Logistic { .. } => VALIDATION_HORIZON_SECONDS,
            DecayFunction::Sigmoid { .. } => {
                find_zero_crossing(self, 0.0, VALIDATION_HORIZON_SECONDS)
            }
        }
    }

    /// Runs the pointwise contract over `t ∈ [0, 7200]`: weight in
    /// `[0, 1]`, monotone non-increasing, and within `1e-4` of zero at
    /// `reaches_zero_at()`.
    pub fn validate(&self) -> AccessResult<()> {
        let zero_point = self.reaches_zero_at();
        if !(zero_point > self.cutoff_like() && zero_point <= VALIDATION_HORIZON_SECONDS) {
            return Err(AccessError::BadConfig(format!(
                "{self:?}: reaches_zero_at={zero_point} must be in (cutoff, 7200]"
            )));
        }

        let mut prev_weight = f64::INFINITY;
        let mut t = 0.0;
        while t <= VALIDATION_HORIZON_SECONDS {
            let w = self.compute_weight(t);
            if !(0.0..=1.0).contains(&w) {
                return Err(AccessError::BadConfig(format!(
                    "{self:?}: weight {w} at t={t} out of [0,1]"
                )));
            }
            if w > prev_weight + 1e-9 {
                return Err(AccessError::BadConfig(format!(
                    "{self:?}: weight increased from {prev_weight} to {w} at t={t}"
                )));
            }
            prev_weight = w;
            t += VALIDATION_STEP_SECONDS;
        }

        let weight_at_zero = self.compute_weight(zero_point);
        if weight_at_zero > ZERO_TOLERANCE {
            return Err(AccessError::BadConfig(format!(
                "{self:?}: weight {weight_at_zero} at reaches_zero_at={zero_point} exceeds tolerance"
            )));
        }

        Ok(())
    }

    fn cutoff_like(&self) -> f64 {
        match *self {
            DecayFunction::Step { cutoff_seconds }
            | DecayFunction::Linear { cutoff_seconds, .. }
            | DecayFunction::Logistic { cutoff_seconds, .. }
            | DecayFunction::Sigmoid { cutoff_seconds, .. } => cutoff_seconds,
            DecayFunction::Exponential { .. } => 0.0,
        }
    }
}

/// Binary search for the smallest `t` in `[lo, hi]` where `f.compute_weight(t)
/// <= ZERO_TOLERANCE`, used by decay shapes whose zero point has no closed
/// form.
fn find_zero_crossing(f: &DecayFunction, lo: f64, hi: f64) -> f64 {
    let mut lo = lo;
    let mut hi = hi;
    for _ in 0..64 {
        let mid = (lo + hi) / 2.0;
        if f.compute_weight(mid) <= ZERO_TOLERANCE {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    hi
}
