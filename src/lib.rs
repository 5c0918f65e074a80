//! Lunar landing-window search.
//!
//! For a fixed selenographic site, finds every interval in which the Sun
//! rises through a target elevation band. The Sun's position comes from an
//! injected [`PhaseAngleProvider`]; [`LowPrecisionEphemeris`] is bundled.
//!
//! The C ABI at the bottom of this file wraps the search for mobile hosts
//! and hands back JSON.

use std::ffi::{c_char, CString};
use std::sync::Once;

use log::{error, info};
use serde::Serialize;

pub mod config;
pub mod ephemeris;
pub mod error;
pub mod geometry;
pub mod search;
pub mod time_utils;
pub mod types;

pub use config::{SearchConfig, DEFAULT_TOLERANCE_MS};
pub use ephemeris::{julian_day, LowPrecisionEphemeris, PhaseAngleProvider};
pub use error::{Error, Result};
pub use geometry::{
    angular_distance_deg, calculate_sun_elevation, normalize_longitude, sub_solar_point,
    sub_solar_point_from_phase, SUBSOLAR_LATITUDE_AMPLITUDE_DEG,
};
pub use search::{
    find_elevation_crossing, find_landing_windows, find_landing_windows_default,
    sample_elevations, ElevationSamples,
};
pub use time_utils::{format_date, parse_date};
pub use types::{ElevationSample, LandingSite, LandingWindow, SubSolarPoint, WindowExit};

// ---------- Output model ----------
#[derive(Serialize)]
struct WindowRecord {
    start_epoch: i64,          // UTC seconds since epoch
    end_epoch: i64,
    peak_epoch: i64,
    start_utc: String,         // "YYYY-MM-DD HH:MM:SS UT"
    end_utc: String,
    peak_utc: String,
    peak_elevation_deg: f64,
    duration_hours: f64,
    exit: WindowExit,
}

impl From<&LandingWindow> for WindowRecord {
    fn from(w: &LandingWindow) -> Self {
        Self {
            start_epoch: w.start_date.timestamp(),
            end_epoch: w.end_date.timestamp(),
            peak_epoch: w.peak_time.timestamp(),
            start_utc: format_date(w.start_date),
            end_utc: format_date(w.end_date),
            peak_utc: format_date(w.peak_time),
            peak_elevation_deg: w.peak_elevation,
            duration_hours: w.duration_hours,
            exit: w.exit,
        }
    }
}

// ---------- Logging ----------

static INIT_LOGGER: Once = Once::new();

#[cfg(target_os = "android")]
pub fn init_logger() {
    use android_logger::Config;
    use log::LevelFilter;
    INIT_LOGGER.call_once(|| {
        android_logger::init_once(
            Config::default()
                .with_max_level(LevelFilter::Info)
                .with_tag("lunar_windows"),
        );
    });
}

/// Install `env_logger` once; `RUST_LOG` overrides the default `info` level.
#[cfg(not(target_os = "android"))]
pub fn init_logger() {
    INIT_LOGGER.call_once(|| {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .try_init();
    });
}

// ---------- C ABI ----------

fn json_to_c(json: String) -> *mut c_char {
    CString::new(json).unwrap_or_default().into_raw()
}

#[no_mangle]
pub extern "C" fn free_json(ptr: *mut c_char) {
    if ptr.is_null() { return; }
    unsafe { let _ = CString::from_raw(ptr); }
}

/// Sun elevation in degrees at a site for a UTC epoch (seconds).
#[no_mangle]
pub extern "C" fn lw_sun_elevation(lat: f64, lon: f64, epoch: i64) -> f64 {
    let site = LandingSite::new(lat, lon);
    calculate_sun_elevation(&LowPrecisionEphemeris, &site, time_utils::epoch_to_utc(epoch))
}

/// JSON array of landing windows; `"[]"` when the inputs are rejected.
/// Release the result with [`free_json`].
#[no_mangle]
pub extern "C" fn lw_find_landing_windows(
    lat: f64, lon: f64,
    start_epoch: i64, end_epoch: i64,
    min_elevation_deg: f64, max_elevation_deg: f64,
) -> *mut c_char {
    init_logger();
    info!("[lw_find_landing_windows] Starting search");

    let site = match LandingSite::try_new(lat, lon) {
        Ok(s) => s,
        Err(e) => {
            error!("[lw_find_landing_windows] {}", e);
            return json_to_c("[]".to_string());
        }
    };
    let start = time_utils::epoch_to_utc(start_epoch);
    let end = time_utils::epoch_to_utc(end_epoch);
    let config = SearchConfig::with_thresholds(min_elevation_deg, max_elevation_deg);

    let windows = match find_landing_windows(&LowPrecisionEphemeris, &site, start, end, &config) {
        Ok(w) => w,
        Err(e) => {
            error!("[lw_find_landing_windows] Search failed: {}", e);
            return json_to_c("[]".to_string());
        }
    };

    let records: Vec<WindowRecord> = windows.iter().map(WindowRecord::from).collect();
    let json = serde_json::to_string(&records).unwrap_or_else(|_| "[]".to_string());
    json_to_c(json)
}
