//! This crate provides tools for analyzing perceptual decision making in simulations of
//! spiking neural networks (SNNs) with two competing populations.
//!
//! The simulation itself is delegated to an external simulator; this crate consumes the
//! recorded population firing-rate time series, smooths them with a causal flat window,
//! and detects the first threshold crossing on each side, i.e., the decision time.
//!
//! All times are expressed in milliseconds and all rates in Hertz, as plain `f64` values.
//!
//! # Detecting a Decision
//!
//! ```rust
//! use rusty_decision::rate_series::RateSeries;
//! use rusty_decision::detector::{decision_times, DetectionParams, Outcome};
//!
//! // Rate traces of the two competing populations, sampled every millisecond
//! let mut rates = vec![0.0; 50];
//! rates.extend(vec![60.0; 50]);
//! let left = RateSeries::build(1.0, rates).unwrap();
//! let right = RateSeries::build(1.0, vec![0.0; 100]).unwrap();
//!
//! // Detect the first crossing of a 45 Hz threshold, without smoothing
//! let params = DetectionParams::build(1.0, 45.0).unwrap();
//! let result = decision_times(&left, &right, &params).unwrap();
//!
//! assert_eq!(result.time_left(), 50.0);
//! assert_eq!(result.time_right(), 0.0);
//! assert_eq!(result.outcome(), Outcome::Left);
//! ```
//!
//! # Sampling Surrogate Traces
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use rusty_decision::sampler;
//!
//! // Sample a 500 ms noisy trace ramping up after a stimulus onset at 100 ms
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let trace = sampler::rand(500, 1.0, 10.0, 2.0, 100.0, 0.25, &mut rng).unwrap();
//!
//! assert_eq!(trace.num_samples(), 500);
//! assert_eq!(trace.duration(), 500.0);
//! ```
//!
//! # Aggregating Trials
//!
//! ```rust
//! use rusty_decision::rate_series::RateSeries;
//! use rusty_decision::detector::DetectionParams;
//! use rusty_decision::trials::{decision_times_batch, TrialTally};
//!
//! // The left population ramps past the threshold 5 ms in, the right one never does
//! let mut rates = vec![10.0; 5];
//! rates.extend(vec![50.0; 5]);
//! let left = RateSeries::build(1.0, rates).unwrap();
//! let right = RateSeries::build(1.0, vec![10.0; 10]).unwrap();
//! let pairs = vec![(left, right); 8];
//!
//! let params = DetectionParams::build(1.0, 45.0).unwrap();
//! let results = decision_times_batch(&pairs, &params).unwrap();
//! let tally = TrialTally::from_results(&results);
//!
//! assert_eq!(tally.num_trials(), 8);
//! assert_eq!(tally.num_left(), 8);
//! ```

pub mod detector;
pub mod error;
pub mod rate_series;
pub mod sampler;
pub mod trials;

/// The tolerance for comparing the sampling steps of two rate series.
pub const DT_TOLERANCE: f64 = 1e-9;
/// The decision time reported when the smoothed rate never crosses the threshold.
pub const NO_CROSSING: f64 = 0.0;
