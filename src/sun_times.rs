use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::angles::{self, deg_to_rad, rad_to_deg, DEGREES_PER_HOUR};
use crate::types::SunriseSunset;

/// Sun-centre elevation at sunrise/sunset: refraction plus the solar radius.
pub const SUNRISE_SUNSET_ELEVATION: f64 = -0.833;

pub fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
}

/// UTC instant `decimal_hour` hours after midnight of `date`, truncated to the
/// second. Hours outside 0..24 roll into the neighbouring day.
pub fn decimal_hour_to_utc(date: NaiveDate, decimal_hour: f64) -> DateTime<Utc> {
    let seconds = (decimal_hour * 3600.0).floor() as i64;
    midnight_utc(date) + Duration::seconds(seconds)
}

/// Solar noon in decimal UTC hours, ignoring the equation of time.
pub fn solar_noon_hour(longitude: f64) -> f64 {
    12.0 - longitude / DEGREES_PER_HOUR
}

/// Solar noon on `date`, truncated to the minute.
pub fn solar_noon(longitude: f64, date: NaiveDate) -> DateTime<Utc> {
    let minutes = (solar_noon_hour(longitude) * 60.0).floor() as i64;
    midnight_utc(date) + Duration::minutes(minutes)
}

/// Cosine of the sunrise hour angle. Below -1 the sun never sets, above 1 it
/// never rises.
pub fn cos_sunrise_hour_angle(latitude: f64, declination: f64) -> f64 {
    let lat_rad = deg_to_rad(latitude);
    let dec_rad = deg_to_rad(declination);
    (deg_to_rad(SUNRISE_SUNSET_ELEVATION).sin() - lat_rad.sin() * dec_rad.sin())
        / (lat_rad.cos() * dec_rad.cos())
}

pub fn sunrise_sunset(latitude: f64, longitude: f64, date: NaiveDate) -> SunriseSunset {
    let noon = midnight_utc(date) + Duration::hours(12);
    let declination = angles::solar_declination(angles::julian_day(&noon));

    let cos_h = cos_sunrise_hour_angle(latitude, declination);
    if cos_h < -1.0 {
        return SunriseSunset::PolarDay;
    }
    if cos_h > 1.0 {
        return SunriseSunset::PolarNight;
    }

    let half_day_hours = rad_to_deg(cos_h.acos()) / DEGREES_PER_HOUR;
    let noon_hour = solar_noon_hour(longitude);
    let sunrise_hour = noon_hour - half_day_hours;
    let sunset_hour = noon_hour + half_day_hours;

    SunriseSunset::Times {
        sunrise: decimal_hour_to_utc(date, sunrise_hour),
        sunset: decimal_hour_to_utc(date, sunset_hour),
        daylight_hours: sunset_hour - sunrise_hour,
    }
}
