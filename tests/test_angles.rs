use chrono::{Duration, TimeZone, Utc};
use chrono_tz::Asia::Tokyo;

use sky_globe::angles::*;

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

// ── DayOfYear ──

#[test]
fn test_day_of_year_known_dates() {
    assert_eq!(day_of_year(2026, 1, 1), 1);
    assert_eq!(day_of_year(2026, 3, 21), 80);
    assert_eq!(day_of_year(2026, 12, 31), 365);
}

#[test]
fn test_day_of_year_leap_year() {
    assert_eq!(day_of_year(2024, 2, 29), 60);
    assert_eq!(day_of_year(2024, 3, 1), 61);
    assert_eq!(day_of_year(2024, 12, 31), 366);
}

#[test]
fn test_day_of_year_century_leap_rules() {
    assert_eq!(day_of_year(2000, 2, 29), 60);
    assert_eq!(day_of_year(1900, 2, 28), 59);
    assert_eq!(day_of_year(1900, 3, 1), 60);
}

// ── NormalizeAngle ──

#[test]
fn test_normalize_angle_basic() {
    let cases: &[(f64, f64)] = &[
        (0.0, 0.0),
        (360.0, 0.0),
        (361.0, 1.0),
        (-1.0, 359.0),
        (-180.0, 180.0),
        (810.0, 90.0),
    ];
    for &(input, expected) in cases {
        assert_approx!(normalize_angle(input), expected, 1e-9);
    }
}

#[test]
fn test_normalize_signed_angle_range() {
    let cases: &[(f64, f64)] = &[
        (0.0, 0.0),
        (180.0, 180.0),
        (-180.0, 180.0),
        (181.0, -179.0),
        (359.0, -1.0),
        (-190.0, 170.0),
        (540.0, 180.0),
    ];
    for &(input, expected) in cases {
        assert_approx!(normalize_signed_angle(input), expected, 1e-9);
    }
}

// ── JulianDay ──

#[test]
fn test_julian_day_j2000_epoch() {
    let dt = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
    assert_eq!(julian_day(&dt), J2000);
}

#[test]
fn test_julian_day_reference_dates() {
    let cases = [
        (Utc.with_ymd_and_hms(1987, 1, 27, 0, 0, 0).unwrap(), 2446822.5),
        (Utc.with_ymd_and_hms(1999, 1, 1, 0, 0, 0).unwrap(), 2451179.5),
        (Utc.with_ymd_and_hms(1987, 6, 19, 12, 0, 0).unwrap(), 2446966.0),
        (Utc.with_ymd_and_hms(1988, 6, 19, 12, 0, 0).unwrap(), 2447332.0),
    ];
    for (dt, expected) in cases {
        assert_approx!(julian_day(&dt), expected, 1e-9);
    }
}

#[test]
fn test_julian_day_includes_time_of_day() {
    let midnight = Utc.with_ymd_and_hms(2024, 5, 10, 0, 0, 0).unwrap();
    let six = Utc.with_ymd_and_hms(2024, 5, 10, 6, 0, 0).unwrap();
    assert_approx!(julian_day(&six) - julian_day(&midnight), 0.25, 1e-9);
}

#[test]
fn test_julian_day_advances_by_one_per_day() {
    let mut t = Utc.with_ymd_and_hms(2023, 1, 1, 6, 30, 15).unwrap();
    for _ in 0..(2 * 366) {
        let next = t + Duration::days(1);
        assert_approx!(julian_day(&next) - julian_day(&t), 1.0, 1e-9);
        t = next;
    }
}

#[test]
fn test_julian_day_is_timezone_independent() {
    let tokyo = Tokyo.with_ymd_and_hms(2024, 6, 21, 21, 0, 0).unwrap();
    let utc = Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
    assert_eq!(julian_day(&tokyo), julian_day(&utc));
}

// ── SolarDeclination ──

#[test]
fn test_solar_declination_solstices_equinoxes() {
    let at = |m, d| julian_day(&Utc.with_ymd_and_hms(2024, m, d, 12, 0, 0).unwrap());
    assert_approx!(solar_declination(at(6, 21)), 23.44, 0.5);
    assert_approx!(solar_declination(at(12, 21)), -23.44, 0.5);
    assert_approx!(solar_declination(at(3, 20)), 0.0, 0.5);
    assert_approx!(solar_declination(at(9, 22)), 0.0, 0.5);
}

#[test]
fn test_solar_declination_bounded_all_days() {
    let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    for n in 0..(365 * 4) {
        let t = start + Duration::hours(6 * n);
        let decl = solar_declination(julian_day(&t));
        assert!(decl.abs() <= EARTH_AXIAL_TILT + 1e-9, "{}: {}", t, decl);
    }
}

#[test]
fn test_solar_declination_is_smooth() {
    let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let mut prev = solar_declination(julian_day(&start));
    for h in 1..(24 * 365) {
        let d = solar_declination(julian_day(&(start + Duration::hours(h))));
        assert!((d - prev).abs() < 0.05, "jump at hour {}", h);
        prev = d;
    }
}

// ── HourAngle ──

#[test]
fn test_hour_angle_at_epoch() {
    assert_approx!(hour_angle(0.0, J2000), 280.460618 - 360.0, 1e-9);
    assert_approx!(hour_angle(100.0, J2000), 20.460618, 1e-9);
}

#[test]
fn test_hour_angle_range() {
    let jd = julian_day(&Utc.with_ymd_and_hms(2024, 8, 1, 3, 17, 0).unwrap());
    let mut lon = -180.0;
    while lon < 180.0 {
        let ha = hour_angle(lon, jd);
        assert!(ha > -180.0 && ha <= 180.0, "lon {}: {}", lon, ha);
        lon += 0.5;
    }
}

#[test]
fn test_hour_angle_tracks_longitude() {
    let jd = 2460000.25;
    let base = hour_angle(0.0, jd);
    assert_approx!(normalize_signed_angle(hour_angle(15.0, jd) - base), 15.0, 1e-9);
    assert_approx!(normalize_signed_angle(hour_angle(-45.0, jd) - base), -45.0, 1e-9);
}

// ── Elevation / Azimuth ──

#[test]
fn test_solar_elevation_overhead_and_horizon() {
    assert_approx!(solar_elevation(0.0, 0.0, 0.0), 90.0, 1e-9);
    assert_approx!(solar_elevation(45.0, 0.0, 0.0), 45.0, 1e-9);
    assert_approx!(solar_elevation(0.0, 0.0, 90.0), 0.0, 1e-9);
    assert_approx!(solar_elevation(0.0, 0.0, 180.0), -90.0, 1e-9);
}

#[test]
fn test_solar_azimuth_cardinal_directions() {
    // Noon in the northern mid-latitudes: due south.
    assert_approx!(solar_azimuth(45.0, 0.0, 0.0), 180.0, 1e-9);
    // Six hours past noon at the equinox: due west.
    assert_approx!(solar_azimuth(45.0, 0.0, 90.0), 270.0, 1e-9);
    assert_approx!(solar_azimuth(45.0, 0.0, -90.0), 90.0, 1e-9);
}

#[test]
fn test_solar_azimuth_range() {
    for lat in [-80.0, -30.0, 0.0, 30.0, 80.0] {
        for dec in [-23.0, 0.0, 23.0] {
            for ha in [-179.0, -90.0, -1.0, 0.0, 1.0, 90.0, 180.0] {
                let az = solar_azimuth(lat, dec, ha);
                assert!((0.0..360.0).contains(&az), "{} {} {}: {}", lat, dec, ha, az);
            }
        }
    }
}

// ── AirMass / Daylight ──

#[test]
fn test_air_mass() {
    assert_approx!(air_mass(90.0).unwrap(), 1.0, 1e-12);
    assert_approx!(air_mass(30.0).unwrap(), 2.0, 1e-9);
    assert_eq!(air_mass(3.0), Some(AIR_MASS_CEILING));
    assert_eq!(air_mass(0.0), None);
    assert_eq!(air_mass(-10.0), None);
}

#[test]
fn test_is_daylight_uses_civil_twilight() {
    assert!(is_daylight(10.0));
    assert!(is_daylight(-5.9));
    assert!(!is_daylight(-6.0));
    assert!(!is_daylight(-20.0));
}

// ── SolarPosition ──

#[test]
fn test_solar_position_fields_are_consistent() {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    for step in 0..40 {
        let t = start + Duration::hours(step * 223);
        for lat in [-89.0, -45.0, 0.0, 35.7, 66.5, 89.0] {
            for lon in [-179.0, -75.0, 0.0, 139.7, 180.0] {
                let pos = solar_position(lat, lon, &t);
                assert_eq!(pos.is_daylight, pos.elevation > -6.0);
                assert_approx!(pos.zenith, 90.0 - pos.elevation, 1e-9);
                assert!((-90.0..=90.0).contains(&pos.elevation));
                assert!((0.0..360.0).contains(&pos.azimuth));
                assert_eq!(pos.air_mass.is_some(), pos.elevation > 0.0);
                assert_eq!(pos.julian_day, julian_day(&t));
            }
        }
    }
}

#[test]
fn test_solar_position_matches_components() {
    let t = Tokyo.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
    let pos = solar_position(35.68, 139.69, &t);
    let jd = julian_day(&t);
    let dec = solar_declination(jd);
    let ha = hour_angle(139.69, jd);
    assert_eq!(pos.declination, dec);
    assert_eq!(pos.hour_angle, ha);
    assert_eq!(pos.elevation, solar_elevation(35.68, dec, ha));
    assert_eq!(pos.azimuth, solar_azimuth(35.68, dec, ha));
}
