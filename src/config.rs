use chrono::Duration;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_MIN_ELEVATION_DEG: f64 = 6.0;
pub const DEFAULT_MAX_ELEVATION_DEG: f64 = 9.0;
pub const DEFAULT_SAMPLE_STEP_MINUTES: i64 = 180;
pub const DEFAULT_TOLERANCE_MS: i64 = 60_000;

/// Elevation band and numeric knobs for a landing-window search.
///
/// Missing keys in a JSON document fall back to the defaults, so
/// `{"max_elevation_deg": 12.0}` is a complete configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub min_elevation_deg: f64,
    pub max_elevation_deg: f64,
    pub sample_step_minutes: i64,
    pub tolerance_ms: i64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_elevation_deg: DEFAULT_MIN_ELEVATION_DEG,
            max_elevation_deg: DEFAULT_MAX_ELEVATION_DEG,
            sample_step_minutes: DEFAULT_SAMPLE_STEP_MINUTES,
            tolerance_ms: DEFAULT_TOLERANCE_MS,
        }
    }
}

impl SearchConfig {
    pub fn with_thresholds(min_elevation_deg: f64, max_elevation_deg: f64) -> Self {
        Self {
            min_elevation_deg,
            max_elevation_deg,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: SearchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        // NaN fails this comparison too
        if !(self.min_elevation_deg < self.max_elevation_deg) {
            warn!(
                "[SearchConfig] rejected band min={} max={}",
                self.min_elevation_deg, self.max_elevation_deg
            );
            return Err(Error::InvalidThresholds {
                min: self.min_elevation_deg,
                max: self.max_elevation_deg,
            });
        }
        if self.sample_step_minutes <= 0 {
            warn!("[SearchConfig] rejected sample step {} min", self.sample_step_minutes);
            return Err(Error::InvalidSampleStep(self.sample_step_minutes));
        }
        if self.tolerance_ms <= 0 {
            warn!("[SearchConfig] rejected tolerance {} ms", self.tolerance_ms);
            return Err(Error::InvalidTolerance(self.tolerance_ms));
        }
        Ok(())
    }

    pub fn sample_step(&self) -> Duration {
        Duration::try_minutes(self.sample_step_minutes).unwrap_or(Duration::MAX)
    }

    pub fn tolerance(&self) -> Duration {
        Duration::milliseconds(self.tolerance_ms)
    }
}
