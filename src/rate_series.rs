//! Module implementing the concept of a population firing-rate time series.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use super::error::DecisionError;

/// Represents the firing rate of a population over time, sampled at a fixed time step.
///
/// The k-th sample is the rate at time k * dt, starting from the beginning of the
/// simulation. The series is immutable once built; smoothing produces a new series.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct RateSeries {
    /// The sampling step, in milliseconds.
    dt: f64,
    /// The firing rates, in Hertz.
    rates: Vec<f64>,
}

impl RateSeries {
    /// Create a rate series with the specified sampling step and rates.
    /// The function returns an error for invalid sampling steps or rates.
    pub fn build(dt: f64, rates: Vec<f64>) -> Result<Self, DecisionError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(DecisionError::InvalidSamplingStep(dt));
        }

        if rates.is_empty() {
            return Err(DecisionError::EmptySeries);
        }

        if let Some((index, &rate)) = rates.iter().find_position(|r| !r.is_finite() || **r < 0.0)
        {
            return Err(DecisionError::InvalidRate { index, rate });
        }

        Ok(RateSeries { dt, rates })
    }

    /// Returns the sampling step of the series, in milliseconds.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Returns the firing rates of the series, in Hertz.
    pub fn rates(&self) -> &[f64] {
        &self.rates[..]
    }

    /// Returns the number of samples in the series.
    pub fn num_samples(&self) -> usize {
        self.rates.len()
    }

    /// Returns the duration of the simulated horizon covered by the series, in milliseconds.
    pub fn duration(&self) -> f64 {
        self.rates.len() as f64 * self.dt
    }

    /// Returns the time of the k-th sample, in milliseconds.
    pub fn time_at(&self, k: usize) -> f64 {
        k as f64 * self.dt
    }

    /// Smooth the series with a causal flat window of the specified width, in milliseconds.
    ///
    /// The width is converted to a whole number of samples (at least one); the k-th smoothed
    /// sample is the average of the raw samples in the window ending at k, so no future
    /// sample ever contributes. Near the start of the series the window is truncated to the
    /// available samples. A window of a single sample leaves the series unchanged.
    ///
    /// The function returns an error for non-positive or non-finite widths.
    pub fn smooth(&self, window_width: f64) -> Result<RateSeries, DecisionError> {
        if !window_width.is_finite() || window_width <= 0.0 {
            return Err(DecisionError::InvalidWindow(window_width));
        }

        let window = ((window_width / self.dt).round() as usize).max(1);

        // Running sum over the causal window, truncated at the start of the series
        let mut smoothed = Vec::with_capacity(self.rates.len());
        let mut sum = 0.0;
        for k in 0..self.rates.len() {
            sum += self.rates[k];
            if k >= window {
                sum -= self.rates[k - window];
            }
            smoothed.push(sum / (k + 1).min(window) as f64);
        }

        Ok(RateSeries {
            dt: self.dt,
            rates: smoothed,
        })
    }

    /// Save the rate series to a JSON file at the specified path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Load a rate series from a JSON file at the specified path.
    pub fn load_from<P: AsRef<Path>>(path: P) -> std::io::Result<RateSeries> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_series_build() {
        let series = RateSeries::build(0.5, vec![0.0, 10.0, 25.0]).unwrap();
        assert_eq!(series.dt(), 0.5);
        assert_eq!(series.rates(), &[0.0, 10.0, 25.0]);
        assert_eq!(series.num_samples(), 3);
        assert_eq!(series.duration(), 1.5);
        assert_eq!(series.time_at(2), 1.0);

        // Test invalid sampling steps
        assert_eq!(
            RateSeries::build(0.0, vec![1.0]),
            Err(DecisionError::InvalidSamplingStep(0.0))
        );
        assert_eq!(
            RateSeries::build(-1.0, vec![1.0]),
            Err(DecisionError::InvalidSamplingStep(-1.0))
        );
        assert!(RateSeries::build(f64::NAN, vec![1.0]).is_err());

        // Test empty series
        assert_eq!(RateSeries::build(1.0, vec![]), Err(DecisionError::EmptySeries));

        // Test invalid rates
        assert_eq!(
            RateSeries::build(1.0, vec![0.0, -5.0]),
            Err(DecisionError::InvalidRate {
                index: 1,
                rate: -5.0
            })
        );
        assert!(RateSeries::build(1.0, vec![f64::INFINITY]).is_err());
    }

    #[test]
    fn test_smooth_single_sample_window_is_noop() {
        let series = RateSeries::build(1.0, vec![0.0, 10.0, 60.0, 30.0]).unwrap();
        assert_eq!(series.smooth(1.0).unwrap(), series);
        // Any width rounding to a single sample is a no-op as well
        assert_eq!(series.smooth(0.3).unwrap(), series);
    }

    #[test]
    fn test_smooth_flat_window() {
        let series = RateSeries::build(1.0, vec![0.0, 0.0, 30.0, 30.0, 30.0]).unwrap();
        let smoothed = series.smooth(3.0).unwrap();
        assert_eq!(smoothed.dt(), 1.0);
        assert_eq!(smoothed.rates(), &[0.0, 0.0, 10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_smooth_constant_series_is_invariant() {
        let series = RateSeries::build(0.1, vec![10.0; 50]).unwrap();
        for width in [0.1, 0.5, 2.0, 10.0] {
            assert_eq!(series.smooth(width).unwrap(), series);
        }
    }

    #[test]
    fn test_smooth_window_longer_than_series() {
        let series = RateSeries::build(1.0, vec![10.0, 20.0, 30.0]).unwrap();
        let smoothed = series.smooth(100.0).unwrap();
        assert_eq!(smoothed.rates(), &[10.0, 15.0, 20.0]);
    }

    #[test]
    fn test_smooth_invalid_window() {
        let series = RateSeries::build(1.0, vec![10.0, 20.0]).unwrap();
        assert_eq!(series.smooth(0.0), Err(DecisionError::InvalidWindow(0.0)));
        assert_eq!(series.smooth(-2.0), Err(DecisionError::InvalidWindow(-2.0)));
        assert!(series.smooth(f64::INFINITY).is_err());
    }
}
