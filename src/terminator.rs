//! Day/night terminator: the line where the sun sits on the horizon.
//!
//! For each sampled longitude the solver finds the latitude with zero solar
//! elevation from `cos(lat) = -tan(dec) / tan(H)`. Longitudes with no real
//! solution get a synthetic point near the pole in constant daylight.

use std::f64::consts::FRAC_PI_4;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::angles::{self, deg_to_rad, rad_to_deg};
use crate::types::TerminatorCurve;

pub const DEFAULT_POINT_COUNT: usize = 360;

/// Latitude of the terminator for a declination and hour angle, both in degrees.
pub fn terminator_latitude(declination: f64, hour_angle: f64) -> f64 {
    let dec_rad = deg_to_rad(declination);
    let tan_ha = deg_to_rad(hour_angle).tan();

    if tan_ha == 0.0 {
        debug!(declination, hour_angle, "terminator: zero hour angle, using fallback latitude");
        return if dec_rad.abs() < FRAC_PI_4 {
            0.0
        } else if dec_rad > 0.0 {
            90.0
        } else {
            -90.0
        };
    }

    let cos_lat = -dec_rad.tan() / tan_ha;
    if cos_lat.abs() <= 1.0 {
        let latitude = rad_to_deg(cos_lat.abs().acos());
        if cos_lat < 0.0 {
            -latitude
        } else {
            latitude
        }
    } else if dec_rad > 0.0 {
        90.0 - rad_to_deg(dec_rad).abs()
    } else {
        -90.0 + rad_to_deg(dec_rad).abs()
    }
}

/// Sample the terminator at `point_count` longitudes from -180 (inclusive)
/// towards 180 (exclusive).
pub fn terminator_curve(at: DateTime<Utc>, point_count: usize) -> TerminatorCurve {
    let jd = angles::julian_day(&at);
    let declination = angles::solar_declination(jd);

    let points = (0..point_count)
        .map(|i| {
            let longitude = -180.0 + (360 * i) as f64 / point_count as f64;
            let ha = angles::hour_angle(longitude, jd);
            (longitude, terminator_latitude(declination, ha))
        })
        .collect();

    TerminatorCurve {
        points,
        calculated_at: at,
    }
}
