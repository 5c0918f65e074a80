//! Error types for lunar_windows

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type for lunar_windows operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the crossing locator, the window search and configuration loading.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Elevation minus threshold has the same strict sign at both ends of the bracket.
    #[error("no bracketed crossing of {threshold}° between {lo} and {hi}")]
    NoBracketedCrossing {
        lo: DateTime<Utc>,
        hi: DateTime<Utc>,
        threshold: f64,
    },

    /// Crossing tolerance must be strictly positive.
    #[error("invalid tolerance: {0} ms")]
    InvalidTolerance(i64),

    /// Minimum elevation must lie strictly below maximum elevation.
    #[error("invalid elevation band: min {min}° must be below max {max}°")]
    InvalidThresholds { min: f64, max: f64 },

    /// Sampling cadence must be strictly positive.
    #[error("invalid sample step: {0} min")]
    InvalidSampleStep(i64),

    #[error("invalid landing site: lat {latitude}°, lon {longitude}°")]
    InvalidSite { latitude: f64, longitude: f64 },

    /// Malformed JSON configuration
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
