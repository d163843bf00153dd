//! Module for sampling surrogate population rate traces.
//!
//! The traces emulate the rate monitors recorded by an external simulator: a noisy
//! baseline before the stimulus onset and a linear ramp afterwards. They are meant for
//! testing and statistics gathering; no spiking dynamics are simulated.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use super::error::DecisionError;
use super::rate_series::RateSeries;

/// Samples a surrogate population rate trace with a noisy baseline and a linear ramp
/// after the stimulus onset.
///
/// # Parameters
/// - `num_samples`: The number of samples in the trace.
/// - `dt`: The sampling step, in milliseconds.
/// - `baseline`: The mean baseline rate, in Hertz.
/// - `noise_std`: The standard deviation of the Gaussian rate noise, in Hertz.
/// - `onset`: The stimulus onset time, in milliseconds.
/// - `slope`: The ramp slope after the onset, in Hertz per millisecond.
/// - `rng`: A mutable reference to a random number generator implementing the `Rng` trait.
///
/// # Returns
/// A rate series whose samples are clamped at zero, since firing rates are non-negative.
pub fn rand<R: Rng>(
    num_samples: usize,
    dt: f64,
    baseline: f64,
    noise_std: f64,
    onset: f64,
    slope: f64,
    rng: &mut R,
) -> Result<RateSeries, DecisionError> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(DecisionError::InvalidSamplingStep(dt));
    }

    if num_samples == 0 {
        return Err(DecisionError::EmptySeries);
    }

    if !baseline.is_finite() || baseline < 0.0 {
        return Err(DecisionError::InvalidParameter(format!(
            "baseline rate must be non-negative and finite, got {}",
            baseline
        )));
    }

    if !onset.is_finite() || onset < 0.0 {
        return Err(DecisionError::InvalidParameter(format!(
            "stimulus onset must be non-negative and finite, got {}",
            onset
        )));
    }

    if !slope.is_finite() {
        return Err(DecisionError::InvalidParameter(format!(
            "ramp slope must be finite, got {}",
            slope
        )));
    }

    let noise = Normal::new(0.0, noise_std)
        .map_err(|e| DecisionError::InvalidParameter(e.to_string()))?;

    let rates = (0..num_samples)
        .map(|k| {
            let time = k as f64 * dt;
            let drive = if time < onset {
                baseline
            } else {
                baseline + slope * (time - onset)
            };
            (drive + noise.sample(rng)).max(0.0)
        })
        .collect();

    RateSeries::build(dt, rates)
}
