use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};

use crate::types::SolarPosition;

pub const EARTH_AXIAL_TILT: f64 = 23.44;
pub const DEGREES_PER_HOUR: f64 = 15.0;
/// Julian Day of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000: f64 = 2451545.0;
/// Elevation below which the sun counts as down for display purposes.
pub const CIVIL_TWILIGHT_ELEVATION: f64 = -6.0;
/// Air mass reported once the zenith angle reaches 85°.
pub const AIR_MASS_CEILING: f64 = 38.0;

const SECONDS_PER_DAY: f64 = 86_400.0;
const SIDEREAL_RATE: f64 = 360.98564736629;
const GREENWICH_ANGLE_AT_J2000: f64 = 280.460618;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

/// Wrap an angle into (-180, 180].
pub fn normalize_signed_angle(angle: f64) -> f64 {
    let wrapped = normalize_angle(angle);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

pub fn leap_year(year: i32) -> bool {
    (year % 400 == 0) || (year % 4 == 0 && year % 100 != 0)
}

pub fn days_in_months(year: i32) -> [u32; 12] {
    [
        31,
        if leap_year(year) { 29 } else { 28 },
        31, 30, 31, 30, 31, 31, 30, 31, 30, 31,
    ]
}

pub fn day_of_year(year: i32, month: u32, day: u32) -> u32 {
    let dim = days_in_months(year);
    let sum: u32 = dim[..(month - 1) as usize].iter().sum();
    sum + day
}

/// Julian Day for an instant, using the Gregorian form of Meeus' formula.
///
/// January and February count as months 13 and 14 of the previous year.
pub fn julian_day<Tz: TimeZone>(dt: &DateTime<Tz>) -> f64 {
    let utc = dt.with_timezone(&Utc);
    let mut year = utc.year();
    let mut month = utc.month() as i32;
    if month <= 2 {
        year -= 1;
        month += 12;
    }

    let a = year.div_euclid(100);
    let b = 2 - a + a.div_euclid(4);

    let day_number = (365.25 * f64::from(year + 4716)).floor()
        + (30.6001 * f64::from(month + 1)).floor()
        + f64::from(utc.day())
        + f64::from(b)
        - 1524.5;
    let seconds =
        f64::from(utc.num_seconds_from_midnight()) + f64::from(utc.nanosecond()) * 1e-9;

    day_number + seconds / SECONDS_PER_DAY
}

/// Solar declination in degrees for a Julian Day.
pub fn solar_declination(julian_day: f64) -> f64 {
    let n = julian_day - J2000;
    let mean_longitude = (280.460 + 0.9856474 * n).rem_euclid(360.0);
    let mean_anomaly = deg_to_rad((357.528 + 0.9856003 * n).rem_euclid(360.0));
    let ecliptic_longitude = deg_to_rad(
        mean_longitude + 1.915 * mean_anomaly.sin() + 0.020 * (2.0 * mean_anomaly).sin(),
    );
    let sin_dec = deg_to_rad(EARTH_AXIAL_TILT).sin() * ecliptic_longitude.sin();
    rad_to_deg(sin_dec.asin())
}

/// Hour angle in degrees, in (-180, 180], for a longitude at a Julian Day.
pub fn hour_angle(longitude: f64, julian_day: f64) -> f64 {
    let greenwich =
        (GREENWICH_ANGLE_AT_J2000 + SIDEREAL_RATE * (julian_day - J2000)).rem_euclid(360.0);
    normalize_signed_angle(greenwich + longitude)
}

pub fn solar_elevation(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let lat_rad = deg_to_rad(latitude);
    let dec_rad = deg_to_rad(declination);
    let ha_rad = deg_to_rad(hour_angle);
    let sin_elevation =
        lat_rad.sin() * dec_rad.sin() + lat_rad.cos() * dec_rad.cos() * ha_rad.cos();
    rad_to_deg(sin_elevation.clamp(-1.0, 1.0).asin())
}

/// Azimuth in [0, 360), measured from north through east.
pub fn solar_azimuth(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let lat_rad = deg_to_rad(latitude);
    let dec_rad = deg_to_rad(declination);
    let ha_rad = deg_to_rad(hour_angle);
    let az_rad = ha_rad
        .sin()
        .atan2(ha_rad.cos() * lat_rad.sin() - dec_rad.tan() * lat_rad.cos());
    normalize_angle(rad_to_deg(az_rad) + 180.0)
}

pub fn solar_zenith_angle(elevation: f64) -> f64 {
    90.0 - elevation
}

/// Plane-parallel air mass, capped near the horizon.
pub fn air_mass(elevation: f64) -> Option<f64> {
    if elevation <= 0.0 {
        return None;
    }
    let zenith = solar_zenith_angle(elevation);
    if zenith < 85.0 {
        Some(1.0 / deg_to_rad(zenith).cos())
    } else {
        Some(AIR_MASS_CEILING)
    }
}

pub fn is_daylight(elevation: f64) -> bool {
    elevation > CIVIL_TWILIGHT_ELEVATION
}

pub fn solar_position<Tz: TimeZone>(
    latitude: f64,
    longitude: f64,
    dt: &DateTime<Tz>,
) -> SolarPosition {
    let jd = julian_day(dt);
    let declination = solar_declination(jd);
    let ha = hour_angle(longitude, jd);
    let elevation = solar_elevation(latitude, declination, ha);
    SolarPosition {
        elevation,
        azimuth: solar_azimuth(latitude, declination, ha),
        zenith: solar_zenith_angle(elevation),
        declination,
        hour_angle: ha,
        air_mass: air_mass(elevation),
        is_daylight: is_daylight(elevation),
        julian_day: jd,
    }
}
