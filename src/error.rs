//! Error module for the Rusty Decision library.
use std::error::Error;
use std::fmt;

/// Error types for the library.
#[derive(Debug, PartialEq)]
pub enum DecisionError {
    /// Error for invalid sampling step, e.g., zero, negative or non-finite time step.
    InvalidSamplingStep(f64),
    /// Error for empty rate series.
    EmptySeries,
    /// Error for invalid firing rate, e.g., negative or non-finite rate value.
    InvalidRate { index: usize, rate: f64 },
    /// Error for invalid smoothing window, e.g., non-positive or non-finite width.
    InvalidWindow(f64),
    /// Error for invalid rate threshold, e.g., negative or non-finite threshold.
    InvalidThreshold(f64),
    /// Error for incompatible rate series, e.g., different lengths or sampling steps.
    IncompatibleSeries(String),
    /// Error for invalid coherence level, i.e., non-finite or outside [-1, 1].
    InvalidCoherence(f64),
    /// Error for invalid parameters.
    InvalidParameter(String),
}

impl fmt::Display for DecisionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DecisionError::InvalidSamplingStep(dt) => {
                write!(f, "Invalid sampling step: {} must be positive and finite", dt)
            }
            DecisionError::EmptySeries => write!(f, "Empty rate series"),
            DecisionError::InvalidRate { index, rate } => write!(
                f,
                "Invalid firing rate at sample {}: {} must be non-negative and finite",
                index, rate
            ),
            DecisionError::InvalidWindow(width) => {
                write!(f, "Invalid smoothing window: {} must be positive and finite", width)
            }
            DecisionError::InvalidThreshold(threshold) => write!(
                f,
                "Invalid rate threshold: {} must be non-negative and finite",
                threshold
            ),
            DecisionError::IncompatibleSeries(e) => write!(f, "Incompatible rate series: {}", e),
            DecisionError::InvalidCoherence(c) => {
                write!(f, "Invalid coherence level: {} must be in [-1, 1]", c)
            }
            DecisionError::InvalidParameter(e) => write!(f, "Invalid parameters: {}", e),
        }
    }
}

impl Error for DecisionError {}
