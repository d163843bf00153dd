//! Module for aggregating decision outcomes across repeated trials.
//!
//! Gathering statistics over many simulation runs is an embarrassingly parallel batch of
//! independent detections; the batch helper runs them in parallel while preserving the
//! order of the input pairs. The tally structures mirror the aggregation performed by an
//! external batch runner: outcome counts and decision-time statistics, optionally keyed
//! by coherence level.

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::detector::{decision_times, DecisionResult, DetectionParams, Outcome};
use super::error::DecisionError;
use super::rate_series::RateSeries;

/// Returns the decision times of many independent left/right trials.
///
/// The trials are processed in parallel and the results preserve the order of the input
/// pairs. The function returns the first error encountered, if any.
pub fn decision_times_batch(
    pairs: &[(RateSeries, RateSeries)],
    params: &DetectionParams,
) -> Result<Vec<DecisionResult>, DecisionError> {
    info!("Detecting decisions for {} trials...", pairs.len());
    pairs
        .par_iter()
        .map(|(left, right)| decision_times(left, right, params))
        .collect()
}

/// Represents aggregated outcome counts and decision-time statistics over repeated trials.
///
/// Decision times only enter the per-side statistics for unambiguous trials; ambiguous
/// trials are counted but their times are discarded.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct TrialTally {
    num_left: usize,
    num_right: usize,
    num_no_decision: usize,
    num_ambiguous: usize,
    times_left: Vec<f64>,
    times_right: Vec<f64>,
}

impl TrialTally {
    /// Create an empty tally.
    pub fn new() -> Self {
        TrialTally {
            num_left: 0,
            num_right: 0,
            num_no_decision: 0,
            num_ambiguous: 0,
            times_left: vec![],
            times_right: vec![],
        }
    }

    /// Create a tally from a slice of decision results.
    pub fn from_results(results: &[DecisionResult]) -> Self {
        let mut tally = TrialTally::new();
        for result in results {
            tally.record(result);
        }
        tally
    }

    /// Record the outcome of a single trial.
    pub fn record(&mut self, result: &DecisionResult) {
        match result.outcome() {
            Outcome::Left => {
                self.num_left += 1;
                self.times_left.push(result.time_left());
            }
            Outcome::Right => {
                self.num_right += 1;
                self.times_right.push(result.time_right());
            }
            Outcome::NoDecision => self.num_no_decision += 1,
            Outcome::Ambiguous => self.num_ambiguous += 1,
        }
    }

    /// Merge another tally into this one.
    pub fn merge(&mut self, other: &TrialTally) {
        self.num_left += other.num_left;
        self.num_right += other.num_right;
        self.num_no_decision += other.num_no_decision;
        self.num_ambiguous += other.num_ambiguous;
        self.times_left.extend_from_slice(&other.times_left);
        self.times_right.extend_from_slice(&other.times_right);
    }

    /// Returns the total number of recorded trials.
    pub fn num_trials(&self) -> usize {
        self.num_left + self.num_right + self.num_no_decision + self.num_ambiguous
    }

    /// Returns the number of trials decided in favor of the left population.
    pub fn num_left(&self) -> usize {
        self.num_left
    }

    /// Returns the number of trials decided in favor of the right population.
    pub fn num_right(&self) -> usize {
        self.num_right
    }

    /// Returns the number of trials without a decision.
    pub fn num_no_decision(&self) -> usize {
        self.num_no_decision
    }

    /// Returns the number of ambiguous trials, i.e., trials where both populations
    /// crossed the threshold.
    pub fn num_ambiguous(&self) -> usize {
        self.num_ambiguous
    }

    /// Returns the decision times of the trials decided left, in milliseconds.
    pub fn times_left(&self) -> &[f64] {
        &self.times_left[..]
    }

    /// Returns the decision times of the trials decided right, in milliseconds.
    pub fn times_right(&self) -> &[f64] {
        &self.times_right[..]
    }

    /// Returns the mean and standard deviation of the left decision times, in
    /// milliseconds, or None if no trial was decided left.
    pub fn time_stats_left(&self) -> Option<(f64, f64)> {
        mean_std(&self.times_left)
    }

    /// Returns the mean and standard deviation of the right decision times, in
    /// milliseconds, or None if no trial was decided right.
    pub fn time_stats_right(&self) -> Option<(f64, f64)> {
        mean_std(&self.times_right)
    }
}

/// Represents trial tallies keyed by coherence level.
///
/// The coherence level is a signed parameter in [-1, 1] controlling the asymmetry of the
/// mean input drive between the two populations. Levels are matched by exact value and
/// kept sorted in increasing order.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct CoherenceSweep {
    levels: Vec<(f64, TrialTally)>,
}

impl CoherenceSweep {
    /// Create an empty sweep.
    pub fn new() -> Self {
        CoherenceSweep { levels: vec![] }
    }

    /// Record the outcome of a trial run at the specified coherence level.
    /// The function returns an error for non-finite levels or levels outside [-1, 1].
    pub fn record(&mut self, coherence: f64, result: &DecisionResult) -> Result<(), DecisionError> {
        if !coherence.is_finite() || coherence < -1.0 || coherence > 1.0 {
            return Err(DecisionError::InvalidCoherence(coherence));
        }

        match self.levels.iter_mut().find(|(c, _)| *c == coherence) {
            Some((_, tally)) => tally.record(result),
            None => {
                let mut tally = TrialTally::new();
                tally.record(result);
                self.levels.push((coherence, tally));
                self.levels.sort_by(|(c1, _), (c2, _)| {
                    c1.partial_cmp(c2)
                        .expect("A problem occured while sorting the coherence levels.")
                });
            }
        }

        Ok(())
    }

    /// Returns the tally recorded at the specified coherence level, if any.
    pub fn tally(&self, coherence: f64) -> Option<&TrialTally> {
        self.levels
            .iter()
            .find(|(c, _)| *c == coherence)
            .map(|(_, tally)| tally)
    }

    /// Returns the recorded coherence levels and their tallies, in increasing order of
    /// coherence.
    pub fn levels(&self) -> &[(f64, TrialTally)] {
        &self.levels[..]
    }
}

/// Returns the mean and population standard deviation of the values, or None if empty.
fn mean_std(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Some((mean, variance.sqrt()))
}
