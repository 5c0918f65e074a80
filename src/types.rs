use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Selenographic (Moon-fixed) surface point in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandingSite {
    pub latitude: f64,
    pub longitude: f64,
}

impl LandingSite {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Like [`LandingSite::new`] but rejects coordinates outside [-90,90] x [-180,180].
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        if (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude) {
            Ok(Self { latitude, longitude })
        } else {
            Err(Error::InvalidSite { latitude, longitude })
        }
    }
}

/// Moon-fixed point with the Sun at the zenith.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubSolarPoint {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElevationSample {
    pub time: DateTime<Utc>,
    pub elevation: f64,
}

/// How a landing window closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowExit {
    /// Elevation rose through the maximum threshold.
    AboveMax,
    /// Elevation fell back below the minimum without reaching the maximum.
    BelowMin,
}

/// One rising pass of the Sun through the elevation band.
///
/// `peak_time` is the midpoint of start and end, not a searched maximum.
/// `peak_elevation` never exceeds the band's maximum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandingWindow {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub peak_time: DateTime<Utc>,
    pub peak_elevation: f64,
    pub duration_hours: f64,
    pub exit: WindowExit,
}

impl LandingWindow {
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        t >= self.start_date && t <= self.end_date
    }
}
