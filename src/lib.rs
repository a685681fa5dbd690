pub mod angles;
pub mod cache;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod rate_limit;
pub mod season;
pub mod sun_times;
pub mod terminator;
pub mod timezone;
pub mod types;

pub use angles::{
    air_mass, day_of_year, deg_to_rad, hour_angle, is_daylight, julian_day, normalize_angle,
    normalize_signed_angle, rad_to_deg, solar_azimuth, solar_declination, solar_elevation,
    solar_position, solar_zenith_angle, CIVIL_TWILIGHT_ELEVATION, DEGREES_PER_HOUR,
    EARTH_AXIAL_TILT, J2000,
};

pub use cache::{category, CacheArgs, CacheKey, CacheStats, TtlCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{CacheConfig, Environment};
pub use engine::SolarEngine;
pub use error::{Error, Result};
pub use rate_limit::RateLimiter;
pub use season::{hemisphere_seasons, season_info};
pub use sun_times::{solar_noon, sunrise_sunset, SUNRISE_SUNSET_ELEVATION};
pub use terminator::{terminator_curve, terminator_latitude, DEFAULT_POINT_COUNT};
pub use timezone::{convert_timezone, local_time, local_time_at, parse_timezone};

pub use types::{Season, SeasonInfo, SolarPosition, SunriseSunset, TerminatorCurve};
