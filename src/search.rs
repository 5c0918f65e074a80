//! Landing-window search: coarse elevation sweep, then bisection on each crossing.
//!
//! Only rising passes count. A window opens when elevation climbs through the
//! minimum and closes at whichever comes first: elevation climbing through the
//! maximum, or elevation falling back below the minimum. A candidate still open
//! when the samples run out is dropped.

use chrono::{DateTime, Duration, Utc};
use log::{debug, info};

use crate::config::SearchConfig;
use crate::ephemeris::PhaseAngleProvider;
use crate::error::{Error, Result};
use crate::geometry::calculate_sun_elevation;
use crate::types::{ElevationSample, LandingSite, LandingWindow, WindowExit};

// ---------- Crossing locator ----------

/// Instant within `tolerance` of where elevation crosses `threshold` inside `[lo, hi]`.
///
/// Fails with [`Error::NoBracketedCrossing`] when elevation minus threshold has the
/// same strict sign at both ends. An endpoint sitting exactly on the threshold
/// counts as bracketed and is returned as is. Reversed brackets are accepted.
pub fn find_elevation_crossing<P: PhaseAngleProvider + ?Sized>(
    ephemeris: &P,
    site: &LandingSite,
    lo: DateTime<Utc>,
    hi: DateTime<Utc>,
    threshold: f64,
    tolerance: Duration,
) -> Result<DateTime<Utc>> {
    if tolerance <= Duration::zero() {
        return Err(Error::InvalidTolerance(tolerance.num_milliseconds()));
    }
    let (mut lo, mut hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };

    let f = |t: DateTime<Utc>| calculate_sun_elevation(ephemeris, site, t) - threshold;

    let mut f_lo = f(lo);
    let f_hi = f(hi);
    // NaN on either side is as good as no sign change
    if !(f_lo * f_hi <= 0.0) {
        return Err(Error::NoBracketedCrossing { lo, hi, threshold });
    }
    if f_lo == 0.0 {
        return Ok(lo);
    }
    if f_hi == 0.0 {
        return Ok(hi);
    }

    while hi - lo > tolerance {
        let mid = lo + (hi - lo) / 2;
        let f_mid = f(mid);
        if f_lo * f_mid < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }

    Ok(lo + (hi - lo) / 2)
}

// ---------- Periodic sampler ----------

/// Lazy elevation series at a fixed cadence from `start` while `time <= end`.
pub struct ElevationSamples<'a, P: PhaseAngleProvider + ?Sized> {
    ephemeris: &'a P,
    site: LandingSite,
    next: Option<DateTime<Utc>>,
    end: DateTime<Utc>,
    step: Duration,
}

impl<P: PhaseAngleProvider + ?Sized> Iterator for ElevationSamples<'_, P> {
    type Item = ElevationSample;

    fn next(&mut self) -> Option<Self::Item> {
        let time = self.next.filter(|t| *t <= self.end)?;
        let elevation = calculate_sun_elevation(self.ephemeris, &self.site, time);
        self.next = time.checked_add_signed(self.step);
        Some(ElevationSample { time, elevation })
    }
}

/// Elevation samples every `step` covering `[start, end]`.
///
/// A non-positive `step` yields no samples.
pub fn sample_elevations<'a, P: PhaseAngleProvider + ?Sized>(
    ephemeris: &'a P,
    site: &LandingSite,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    step: Duration,
) -> ElevationSamples<'a, P> {
    ElevationSamples {
        ephemeris,
        site: *site,
        next: (step > Duration::zero()).then_some(start),
        end,
        step,
    }
}

// ---------- Window detector ----------

struct WindowClose {
    end_date: DateTime<Utc>,
    peak: f64,
    exit: WindowExit,
    /// Sample index to resume the start search from.
    resume_at: usize,
}

/// Every rising landing window in `[start, end]`, chronologically.
pub fn find_landing_windows<P: PhaseAngleProvider + ?Sized>(
    ephemeris: &P,
    site: &LandingSite,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    config: &SearchConfig,
) -> Result<Vec<LandingWindow>> {
    config.validate()?;
    info!(
        "[find_landing_windows] site lat={:.4} lon={:.4}, {} to {}, band {}°..{}°",
        site.latitude, site.longitude, start, end, config.min_elevation_deg, config.max_elevation_deg
    );

    let samples: Vec<ElevationSample> =
        sample_elevations(ephemeris, site, start, end, config.sample_step()).collect();
    debug!("[find_landing_windows] {} samples", samples.len());

    let min = config.min_elevation_deg;
    let tolerance = config.tolerance();
    let mut windows = Vec::new();

    let mut i = 0;
    while i + 1 < samples.len() {
        let (curr, next) = (&samples[i], &samples[i + 1]);
        if !(curr.elevation < min && min <= next.elevation) {
            i += 1;
            continue;
        }

        let start_date = find_elevation_crossing(ephemeris, site, curr.time, next.time, min, tolerance)?;

        let Some(close) = close_window(ephemeris, site, &samples, i, config)? else {
            debug!(
                "[find_landing_windows] window opening {} still open at range end, dropped",
                start_date
            );
            break;
        };
        i = close.resume_at;

        if close.end_date <= start_date {
            debug!(
                "[find_landing_windows] degenerate window {} .. {}, skipped",
                start_date, close.end_date
            );
            continue;
        }

        let span = close.end_date - start_date;
        let window = LandingWindow {
            start_date,
            end_date: close.end_date,
            peak_time: start_date + span / 2,
            peak_elevation: close.peak.min(config.max_elevation_deg),
            duration_hours: span.num_milliseconds() as f64 / 3_600_000.0,
            exit: close.exit,
        };
        debug!(
            "[find_landing_windows] window {} .. {} ({:.2} h, peak {:.2}°, {:?})",
            window.start_date, window.end_date, window.duration_hours, window.peak_elevation, window.exit
        );
        windows.push(window);
    }

    info!("[find_landing_windows] Found {} windows", windows.len());
    Ok(windows)
}

/// Same as [`find_landing_windows`] with the default 6°..9° band.
pub fn find_landing_windows_default<P: PhaseAngleProvider + ?Sized>(
    ephemeris: &P,
    site: &LandingSite,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<LandingWindow>> {
    find_landing_windows(ephemeris, site, start, end, &SearchConfig::default())
}

/// Scan forward from the opening bracket `(open, open + 1)` for the first exit.
fn close_window<P: PhaseAngleProvider + ?Sized>(
    ephemeris: &P,
    site: &LandingSite,
    samples: &[ElevationSample],
    open: usize,
    config: &SearchConfig,
) -> Result<Option<WindowClose>> {
    let (min, max) = (config.min_elevation_deg, config.max_elevation_deg);
    let tolerance = config.tolerance();

    // A coarse cadence can carry the opening sample past max; the scan then
    // closes on the fall below min and the peak is clamped by the caller
    let mut peak = samples[open + 1].elevation;

    for j in (open + 1)..samples.len() - 1 {
        let (a, b) = (&samples[j], &samples[j + 1]);
        peak = peak.max(b.elevation);

        let (threshold, exit) = if a.elevation < max && max <= b.elevation {
            (max, WindowExit::AboveMax)
        } else if a.elevation >= min && min > b.elevation {
            (min, WindowExit::BelowMin)
        } else {
            continue;
        };

        let end_date = find_elevation_crossing(ephemeris, site, a.time, b.time, threshold, tolerance)?;
        return Ok(Some(WindowClose {
            end_date,
            peak,
            exit,
            resume_at: j + 1,
        }));
    }

    Ok(None)
}
