use chrono::{DateTime, TimeZone, Utc};

use lunar_windows::geometry::elevation_from_sub_solar;
use lunar_windows::{
    angular_distance_deg, calculate_sun_elevation, normalize_longitude, sub_solar_point,
    sub_solar_point_from_phase, LandingSite, SubSolarPoint, SUBSOLAR_LATITUDE_AMPLITUDE_DEG,
};

macro_rules! assert_approx {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() <= $tol,
            "assert_approx failed: left={}, right={}, diff={}, tol={}",
            l, r, (l - r).abs(), $tol
        );
    };
}

fn any_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 8, 23, 12, 33, 0).unwrap()
}

// ── normalize_longitude ──

#[test]
fn test_normalize_longitude_cases() {
    let cases: &[(f64, f64)] = &[
        (0.0, 0.0),
        (180.0, 180.0),
        (-180.0, 180.0),
        (190.0, -170.0),
        (-190.0, 170.0),
        (540.0, 180.0),
        (-359.0, 1.0),
        (720.5, 0.5),
    ];
    for &(input, expected) in cases {
        assert_approx!(normalize_longitude(input), expected, 1e-9);
    }
}

#[test]
fn test_normalize_longitude_range() {
    for i in -2000..2000 {
        let lon = normalize_longitude(i as f64 * 0.73);
        assert!(lon > -180.0 && lon <= 180.0, "{}", lon);
    }
}

// ── Sub-solar point ──

#[test]
fn test_sub_solar_new_moon_far_side() {
    let p = sub_solar_point_from_phase(0.0);
    assert_approx!(p.longitude, 180.0, 1e-9);
    assert_approx!(p.latitude, 0.0, 1e-9);
}

#[test]
fn test_sub_solar_full_moon_near_side() {
    let p = sub_solar_point_from_phase(180.0);
    assert_approx!(p.longitude, 0.0, 1e-9);
    assert_approx!(p.latitude, 0.0, 1e-9);
}

#[test]
fn test_sub_solar_quarters() {
    let first = sub_solar_point_from_phase(90.0);
    assert_approx!(first.longitude, 90.0, 1e-9);
    assert_approx!(first.latitude, SUBSOLAR_LATITUDE_AMPLITUDE_DEG, 1e-9);

    let last = sub_solar_point_from_phase(270.0);
    assert_approx!(last.longitude, -90.0, 1e-9);
    assert_approx!(last.latitude, -SUBSOLAR_LATITUDE_AMPLITUDE_DEG, 1e-9);
}

#[test]
fn test_sub_solar_latitude_bounded() {
    for i in 0..3600 {
        let p = sub_solar_point_from_phase(i as f64 * 0.1);
        assert!(p.latitude.abs() <= SUBSOLAR_LATITUDE_AMPLITUDE_DEG + 1e-12);
        assert!(p.longitude > -180.0 && p.longitude <= 180.0);
    }
}

#[test]
fn test_sub_solar_point_uses_provider() {
    let phase = |_t: DateTime<Utc>| 45.0;
    let p = sub_solar_point(&phase, any_instant());
    assert_eq!(p, sub_solar_point_from_phase(45.0));
    assert_approx!(p.longitude, 135.0, 1e-9);
}

// ── Angular distance ──

#[test]
fn test_angular_distance_identical_points() {
    let d = angular_distance_deg(-69.3733, 32.3191, -69.3733, 32.3191);
    assert!(!d.is_nan());
    assert_approx!(d, 0.0, 1e-5);
}

#[test]
fn test_angular_distance_antipodes() {
    let d = angular_distance_deg(30.0, 40.0, -30.0, -140.0);
    assert!(!d.is_nan());
    assert_approx!(d, 180.0, 1e-5);
}

#[test]
fn test_angular_distance_quarter_circle() {
    assert_approx!(angular_distance_deg(0.0, 0.0, 0.0, 90.0), 90.0, 1e-9);
    assert_approx!(angular_distance_deg(0.0, 0.0, 90.0, 0.0), 90.0, 1e-9);
    assert_approx!(angular_distance_deg(0.0, 170.0, 0.0, -170.0), 20.0, 1e-9);
}

// ── Elevation ──

#[test]
fn test_elevation_at_sub_solar_point_is_zenith() {
    let sub = SubSolarPoint { latitude: 1.2, longitude: -45.0 };
    let site = LandingSite::new(1.2, -45.0);
    assert_approx!(elevation_from_sub_solar(&site, &sub), 90.0, 1e-5);
}

#[test]
fn test_elevation_full_and_new_moon_at_sub_earth_point() {
    let site = LandingSite::new(0.0, 0.0);
    let full = |_t: DateTime<Utc>| 180.0;
    let new = |_t: DateTime<Utc>| 0.0;
    assert_approx!(calculate_sun_elevation(&full, &site, any_instant()), 90.0, 1e-5);
    assert_approx!(calculate_sun_elevation(&new, &site, any_instant()), -90.0, 1e-5);
}

#[test]
fn test_elevation_zero_on_terminator() {
    // First quarter: sub-solar longitude 90°, so the 0° meridian sits on the terminator
    let phase = |_t: DateTime<Utc>| 90.0;
    let site = LandingSite::new(0.0, 0.0);
    assert_approx!(calculate_sun_elevation(&phase, &site, any_instant()), 0.0, 1e-9);
}

#[test]
fn test_elevation_bounded_over_cycle() {
    let site = LandingSite::new(-69.3733, 32.3191);
    for i in 0..720 {
        let p = i as f64 * 0.5;
        let phase = move |_t: DateTime<Utc>| p;
        let e = calculate_sun_elevation(&phase, &site, any_instant());
        assert!((-90.0..=90.0).contains(&e), "phase {} elevation {}", p, e);
    }
}

#[test]
fn test_site_constructors() {
    assert!(LandingSite::try_new(-69.3733, 32.3191).is_ok());
    assert!(LandingSite::try_new(90.0, -180.0).is_ok());
    assert!(LandingSite::try_new(90.5, 0.0).is_err());
    assert!(LandingSite::try_new(0.0, 181.0).is_err());
    assert!(LandingSite::try_new(f64::NAN, 0.0).is_err());
    // Unchecked constructor stays total
    let odd = LandingSite::new(120.0, 400.0);
    assert_eq!(odd.latitude, 120.0);
}
