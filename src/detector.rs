//! Module implementing the decision detector for two competing populations.
//!
//! The detector smooths the left and right rate series independently with a causal flat
//! window and reports, for each side, the time of the first sample whose smoothed rate
//! exceeds the threshold. A time of zero means the side never crossed. When both sides
//! cross, the result is reported as-is; this signals a misconfigured threshold or window
//! and is left to the caller to interpret, the detector never picks a winner.
//!
//! # Examples
//!
//! ```rust
//! use rusty_decision::rate_series::RateSeries;
//! use rusty_decision::detector::{decision_times, DetectionParams, Outcome};
//!
//! let left = RateSeries::build(1.0, vec![10.0, 20.0, 40.0, 50.0, 55.0]).unwrap();
//! let right = RateSeries::build(1.0, vec![10.0, 12.0, 8.0, 11.0, 9.0]).unwrap();
//!
//! let params = DetectionParams::build(2.0, 44.0).unwrap();
//! let result = decision_times(&left, &right, &params).unwrap();
//!
//! assert_eq!(result.time_left(), 3.0);
//! assert_eq!(result.outcome(), Outcome::Left);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use super::error::DecisionError;
use super::rate_series::RateSeries;
use super::{DT_TOLERANCE, NO_CROSSING};

/// Represents the caller-supplied detection parameters.
///
/// No defaults are inferred: both the window width and the threshold come from the
/// caller, and only type/range checks are performed. Unreasonable combinations surface
/// as an ambiguous outcome rather than an error.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct DetectionParams {
    /// The width of the causal averaging window, in milliseconds.
    window_width: f64,
    /// The firing-rate threshold, in Hertz.
    rate_threshold: f64,
}

impl DetectionParams {
    /// Create detection parameters with the specified window width and rate threshold.
    /// The function returns an error for invalid widths or thresholds.
    pub fn build(window_width: f64, rate_threshold: f64) -> Result<Self, DecisionError> {
        if !window_width.is_finite() || window_width <= 0.0 {
            return Err(DecisionError::InvalidWindow(window_width));
        }

        if !rate_threshold.is_finite() || rate_threshold < 0.0 {
            return Err(DecisionError::InvalidThreshold(rate_threshold));
        }

        Ok(DetectionParams {
            window_width,
            rate_threshold,
        })
    }

    /// Returns the width of the causal averaging window, in milliseconds.
    pub fn window_width(&self) -> f64 {
        self.window_width
    }

    /// Returns the firing-rate threshold, in Hertz.
    pub fn rate_threshold(&self) -> f64 {
        self.rate_threshold
    }
}

/// The outcome of a single decision trial.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum Outcome {
    /// Only the left population crossed the threshold.
    Left,
    /// Only the right population crossed the threshold.
    Right,
    /// Neither population crossed the threshold within the simulated horizon.
    NoDecision,
    /// Both populations crossed the threshold, indicating a misconfigured
    /// threshold or window rather than a valid decision.
    Ambiguous,
}

/// Represents the decision times of a left/right trial, in milliseconds.
///
/// A time of zero means the corresponding side never crossed the threshold. A crossing
/// at the very first sample is also reported as zero and thus reads as no crossing;
/// callers are expected to place the stimulus onset after the first sample.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct DecisionResult {
    time_left: f64,
    time_right: f64,
}

impl DecisionResult {
    /// Returns the time of the first threshold crossing of the left population, in
    /// milliseconds, or zero if it never crossed.
    pub fn time_left(&self) -> f64 {
        self.time_left
    }

    /// Returns the time of the first threshold crossing of the right population, in
    /// milliseconds, or zero if it never crossed.
    pub fn time_right(&self) -> f64 {
        self.time_right
    }

    /// Returns the outcome of the trial.
    pub fn outcome(&self) -> Outcome {
        match (self.time_left > NO_CROSSING, self.time_right > NO_CROSSING) {
            (true, false) => Outcome::Left,
            (false, true) => Outcome::Right,
            (false, false) => Outcome::NoDecision,
            (true, true) => Outcome::Ambiguous,
        }
    }
}

/// Returns the decision times of the two competing populations.
///
/// Both series are smoothed independently with the causal window of the parameters and
/// scanned in time order for the first sample whose smoothed rate exceeds the threshold.
/// The scan stops at the first crossing of each side.
///
/// The function returns an error if the two series differ in length or sampling step.
pub fn decision_times(
    left: &RateSeries,
    right: &RateSeries,
    params: &DetectionParams,
) -> Result<DecisionResult, DecisionError> {
    if left.num_samples() != right.num_samples() {
        return Err(DecisionError::IncompatibleSeries(format!(
            "left has {} samples but right has {}",
            left.num_samples(),
            right.num_samples()
        )));
    }

    if (left.dt() - right.dt()).abs() > DT_TOLERANCE {
        return Err(DecisionError::IncompatibleSeries(format!(
            "left is sampled every {} ms but right every {} ms",
            left.dt(),
            right.dt()
        )));
    }

    let time_left = first_crossing(&left.smooth(params.window_width())?, params.rate_threshold());
    let time_right = first_crossing(
        &right.smooth(params.window_width())?,
        params.rate_threshold(),
    );
    debug!(
        "first crossings: left at {} ms, right at {} ms",
        time_left, time_right
    );

    Ok(DecisionResult {
        time_left,
        time_right,
    })
}

/// Returns the time of the first sample whose rate exceeds the threshold, or zero if
/// no sample does.
fn first_crossing(series: &RateSeries, threshold: f64) -> f64 {
    match series.rates().iter().position(|&rate| rate > threshold) {
        Some(k) => series.time_at(k),
        None => NO_CROSSING,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_series(before: f64, after: f64, step_at: usize, num_samples: usize) -> RateSeries {
        let rates = (0..num_samples)
            .map(|k| if k < step_at { before } else { after })
            .collect();
        RateSeries::build(1.0, rates).unwrap()
    }

    #[test]
    fn test_detection_params_build() {
        let params = DetectionParams::build(20.0, 25.0).unwrap();
        assert_eq!(params.window_width(), 20.0);
        assert_eq!(params.rate_threshold(), 25.0);

        assert_eq!(
            DetectionParams::build(0.0, 25.0),
            Err(DecisionError::InvalidWindow(0.0))
        );
        assert_eq!(
            DetectionParams::build(-1.0, 25.0),
            Err(DecisionError::InvalidWindow(-1.0))
        );
        assert_eq!(
            DetectionParams::build(20.0, -25.0),
            Err(DecisionError::InvalidThreshold(-25.0))
        );
        assert!(DetectionParams::build(f64::NAN, 25.0).is_err());
        assert!(DetectionParams::build(20.0, f64::NAN).is_err());
    }

    #[test]
    fn test_left_decision_at_known_sample() {
        // Left jumps from 0 Hz to 60 Hz at sample 50, right stays silent
        let left = step_series(0.0, 60.0, 50, 100);
        let right = step_series(0.0, 0.0, 0, 100);

        let params = DetectionParams::build(1.0, 45.0).unwrap();
        let result = decision_times(&left, &right, &params).unwrap();

        assert_eq!(result.time_left(), 50.0);
        assert_eq!(result.time_right(), 0.0);
        assert_eq!(result.outcome(), Outcome::Left);
    }

    #[test]
    fn test_no_decision_below_threshold() {
        let left = step_series(10.0, 10.0, 0, 100);
        let right = step_series(10.0, 10.0, 0, 100);

        let params = DetectionParams::build(1.0, 45.0).unwrap();
        let result = decision_times(&left, &right, &params).unwrap();

        assert_eq!(result.time_left(), 0.0);
        assert_eq!(result.time_right(), 0.0);
        assert_eq!(result.outcome(), Outcome::NoDecision);
    }

    #[test]
    fn test_right_decision() {
        let left = step_series(5.0, 5.0, 0, 80);
        let right = step_series(5.0, 50.0, 30, 80);

        let params = DetectionParams::build(1.0, 45.0).unwrap();
        let result = decision_times(&left, &right, &params).unwrap();

        assert_eq!(result.time_left(), 0.0);
        assert_eq!(result.time_right(), 30.0);
        assert_eq!(result.outcome(), Outcome::Right);
    }

    #[test]
    fn test_ambiguous_outcome_reported_as_is() {
        // Both sides cross: the detector reports both times without picking a winner
        let left = step_series(0.0, 60.0, 20, 100);
        let right = step_series(0.0, 60.0, 40, 100);

        let params = DetectionParams::build(1.0, 45.0).unwrap();
        let result = decision_times(&left, &right, &params).unwrap();

        assert_eq!(result.time_left(), 20.0);
        assert_eq!(result.time_right(), 40.0);
        assert_eq!(result.outcome(), Outcome::Ambiguous);
    }

    #[test]
    fn test_threshold_is_strict() {
        // A rate exactly at the threshold does not count as a crossing
        let left = step_series(0.0, 45.0, 10, 50);
        let right = step_series(0.0, 0.0, 0, 50);

        let params = DetectionParams::build(1.0, 45.0).unwrap();
        let result = decision_times(&left, &right, &params).unwrap();
        assert_eq!(result.outcome(), Outcome::NoDecision);
    }

    #[test]
    fn test_smoothing_delays_crossing() {
        // For a monotonically rising signal, widening the window can only delay or
        // eliminate the crossing, never move it earlier
        let rates: Vec<f64> = (0..200).map(|k| k as f64 * 0.5).collect();
        let left = RateSeries::build(1.0, rates).unwrap();
        let right = step_series(0.0, 0.0, 0, 200);

        let mut previous_time = 0.0;
        for width in [1.0, 5.0, 10.0, 25.0, 50.0] {
            let params = DetectionParams::build(width, 45.0).unwrap();
            let result = decision_times(&left, &right, &params).unwrap();
            assert!(result.time_left() >= previous_time);
            previous_time = result.time_left();
        }
    }

    #[test]
    fn test_incompatible_series() {
        let left = step_series(0.0, 60.0, 10, 100);
        let short = step_series(0.0, 0.0, 0, 99);
        let params = DetectionParams::build(1.0, 45.0).unwrap();
        assert!(matches!(
            decision_times(&left, &short, &params),
            Err(DecisionError::IncompatibleSeries(_))
        ));

        let coarse = RateSeries::build(2.0, vec![0.0; 100]).unwrap();
        assert!(matches!(
            decision_times(&left, &coarse, &params),
            Err(DecisionError::IncompatibleSeries(_))
        ));
    }
}
