//! Sun–Moon phase angle oracle.
//!
//! The window search only ever asks for the phase angle (0 = New, 180 = Full).
//! Anything that can answer that question implements [`PhaseAngleProvider`];
//! closures qualify, which keeps synthetic phase functions cheap in tests.

use chrono::{DateTime, Utc};

const J2000_JD: f64 = 2_451_545.0;
const UNIX_EPOCH_JD: f64 = 2_440_587.5;
const MS_PER_DAY: f64 = 86_400_000.0;
const DAYS_PER_CENTURY: f64 = 36_525.0;

pub trait PhaseAngleProvider {
    /// Moon phase angle in degrees, in [0, 360).
    fn phase_angle(&self, t: DateTime<Utc>) -> f64;
}

impl<F> PhaseAngleProvider for F
where
    F: Fn(DateTime<Utc>) -> f64,
{
    fn phase_angle(&self, t: DateTime<Utc>) -> f64 {
        self(t)
    }
}

/// Phase angle from geocentric ecliptic longitudes of the Moon and Sun.
///
/// Sun: mean longitude plus equation of centre (~0.01°).
/// Moon: 24-term truncated ELP-2000 longitude series (~0.1°).
/// UTC stands in for TT; the ~70 s offset is well below either error.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowPrecisionEphemeris;

impl PhaseAngleProvider for LowPrecisionEphemeris {
    fn phase_angle(&self, t: DateTime<Utc>) -> f64 {
        let jd = julian_day(t);
        (moon_longitude_deg(jd) - sun_longitude_deg(jd)).rem_euclid(360.0)
    }
}

pub fn julian_day(t: DateTime<Utc>) -> f64 {
    t.timestamp_millis() as f64 / MS_PER_DAY + UNIX_EPOCH_JD
}

fn centuries_since_j2000(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

pub(crate) fn sun_longitude_deg(jd: f64) -> f64 {
    let t = centuries_since_j2000(jd);

    let l0 = (280.46646 + 36_000.76983 * t + 0.0003032 * t * t).rem_euclid(360.0);
    let m = (357.52911 + 35_999.05029 * t - 0.0001537 * t * t)
        .rem_euclid(360.0)
        .to_radians();

    // Equation of centre
    let c = 1.914_602 * m.sin() + 0.019_993 * (2.0 * m).sin() + 0.000_289 * (3.0 * m).sin();

    (l0 + c).rem_euclid(360.0)
}

pub(crate) fn moon_longitude_deg(jd: f64) -> f64 {
    let t = centuries_since_j2000(jd);

    // Fundamental arguments (degrees)
    let lp = (218.3164477 + 481_267.88123421 * t - 0.0015786 * t * t).rem_euclid(360.0);
    let d = (297.8501921 + 445_267.1114034 * t - 0.0018819 * t * t)
        .rem_euclid(360.0)
        .to_radians();
    let m = (357.5291092 + 35_999.0502909 * t - 0.0001536 * t * t)
        .rem_euclid(360.0)
        .to_radians();
    let mp = (134.9633964 + 477_198.8675055 * t + 0.0087414 * t * t)
        .rem_euclid(360.0)
        .to_radians();
    let f = (93.2720950 + 483_202.0175233 * t - 0.0036539 * t * t)
        .rem_euclid(360.0)
        .to_radians();

    // Longitude terms in 1e-6 degrees
    let sum_l = 6_288_774.0 * mp.sin()
        + 1_274_027.0 * (2.0 * d - mp).sin()
        + 658_314.0 * (2.0 * d).sin()
        + 213_618.0 * (2.0 * mp).sin()
        - 185_116.0 * m.sin()
        - 114_332.0 * (2.0 * f).sin()
        + 58_793.0 * (2.0 * d - 2.0 * mp).sin()
        + 57_066.0 * (2.0 * d - m - mp).sin()
        + 53_322.0 * (2.0 * d + mp).sin()
        + 45_758.0 * (2.0 * d - m).sin()
        - 40_923.0 * (m - mp).sin()
        - 34_720.0 * d.sin()
        - 30_383.0 * (m + mp).sin()
        + 15_327.0 * (2.0 * d - 2.0 * f).sin()
        - 12_528.0 * (mp + 2.0 * f).sin()
        + 10_980.0 * (mp - 2.0 * f).sin()
        + 10_675.0 * (4.0 * d - mp).sin()
        + 10_034.0 * (3.0 * mp).sin()
        + 8_548.0 * (4.0 * d - 2.0 * mp).sin()
        - 7_888.0 * (2.0 * d + m - mp).sin()
        - 6_766.0 * (2.0 * d + m).sin()
        - 5_163.0 * (d - mp).sin()
        + 4_987.0 * (d + m).sin()
        + 4_036.0 * (2.0 * d - m + mp).sin();

    (lp + sum_l / 1_000_000.0).rem_euclid(360.0)
}
