//! Sub-solar point and Sun elevation on the lunar surface.
//!
//! The sub-solar point is a first-order model driven by the phase angle
//! alone: longitude sweeps linearly from the far side (New Moon) to the
//! near side (Full Moon), and latitude oscillates with a fixed 1.54°
//! amplitude. Elevation from that point is exact spherical geometry.

use chrono::{DateTime, Utc};

use crate::ephemeris::PhaseAngleProvider;
use crate::types::{LandingSite, SubSolarPoint};

pub const SUBSOLAR_LATITUDE_AMPLITUDE_DEG: f64 = 1.54;

/// Wrap a longitude into (-180, 180].
pub fn normalize_longitude(mut deg: f64) -> f64 {
    if !deg.is_finite() {
        return deg;
    }
    deg %= 360.0;
    if deg > 180.0 {
        deg -= 360.0;
    } else if deg <= -180.0 {
        deg += 360.0;
    }
    deg
}

pub fn sub_solar_point_from_phase(phase_angle_deg: f64) -> SubSolarPoint {
    SubSolarPoint {
        latitude: SUBSOLAR_LATITUDE_AMPLITUDE_DEG * phase_angle_deg.to_radians().sin(),
        longitude: normalize_longitude(180.0 - phase_angle_deg),
    }
}

pub fn sub_solar_point<P: PhaseAngleProvider + ?Sized>(
    ephemeris: &P,
    t: DateTime<Utc>,
) -> SubSolarPoint {
    sub_solar_point_from_phase(ephemeris.phase_angle(t))
}

/// Great-circle distance in degrees (spherical law of cosines).
pub fn angular_distance_deg(lat1_deg: f64, lon1_deg: f64, lat2_deg: f64, lon2_deg: f64) -> f64 {
    let lat1 = lat1_deg.to_radians();
    let lat2 = lat2_deg.to_radians();
    let dlon = (lon1_deg - lon2_deg).to_radians();

    let cos_d = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * dlon.cos();
    cos_d.clamp(-1.0, 1.0).acos().to_degrees()
}

pub fn elevation_from_sub_solar(site: &LandingSite, sub_solar: &SubSolarPoint) -> f64 {
    90.0 - angular_distance_deg(
        site.latitude,
        site.longitude,
        sub_solar.latitude,
        sub_solar.longitude,
    )
}

/// Sun elevation above the local horizon at `site`, in degrees.
pub fn calculate_sun_elevation<P: PhaseAngleProvider + ?Sized>(
    ephemeris: &P,
    site: &LandingSite,
    t: DateTime<Utc>,
) -> f64 {
    elevation_from_sub_solar(site, &sub_solar_point(ephemeris, t))
}
