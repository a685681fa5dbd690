use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;

use crate::angles;
use crate::cache::{category, CacheArgs, TtlCache};
use crate::error::Result;
use crate::season;
use crate::sun_times;
use crate::terminator;
use crate::timezone;
use crate::types::{SeasonInfo, SolarPosition, SunriseSunset, TerminatorCurve};

/// Solar geometry operations backed by a shared [`TtlCache`].
///
/// Sun positions are cached per whole minute and terminator curves per
/// 10-minute bucket; the first computation in a bucket is served for the
/// rest of it.
#[derive(Debug, Clone)]
pub struct SolarEngine {
    cache: Arc<TtlCache>,
}

impl SolarEngine {
    pub fn new(cache: Arc<TtlCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<TtlCache> {
        &self.cache
    }

    pub fn get_sun_position(&self, latitude: f64, longitude: f64, at: DateTime<Utc>) -> SolarPosition {
        let args = CacheArgs::new()
            .arg(&latitude)
            .arg(&longitude)
            .arg(&truncate_to_minute(at));
        *self.cache.get_or_insert_with(category::SUN_POSITION, &args, || {
            angles::solar_position(latitude, longitude, &at)
        })
    }

    pub fn is_daylight(&self, latitude: f64, longitude: f64, at: DateTime<Utc>) -> bool {
        self.get_sun_position(latitude, longitude, at).is_daylight
    }

    /// Terminator sampled at `point_count` longitudes
    /// (see [`terminator::DEFAULT_POINT_COUNT`]).
    pub fn calculate_day_night_boundary(
        &self,
        at: DateTime<Utc>,
        point_count: usize,
    ) -> Arc<TerminatorCurve> {
        let args = CacheArgs::new()
            .arg(&truncate_to_ten_minutes(at))
            .arg(&point_count);
        self.cache
            .get_or_insert_with(category::DAY_NIGHT_BOUNDARY, &args, || {
                terminator::terminator_curve(at, point_count)
            })
    }

    pub fn calculate_sunrise_sunset(
        &self,
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
    ) -> SunriseSunset {
        sun_times::sunrise_sunset(latitude, longitude, date)
    }

    pub fn solar_noon(&self, longitude: f64, date: NaiveDate) -> DateTime<Utc> {
        sun_times::solar_noon(longitude, date)
    }

    pub fn get_season_info(&self, at: DateTime<Utc>) -> SeasonInfo {
        season::season_info(&at)
    }

    pub fn get_local_time(&self, timezone_id: &str) -> Result<DateTime<Tz>> {
        timezone::local_time(timezone_id)
    }
}

fn truncate_to_minute(at: DateTime<Utc>) -> DateTime<Utc> {
    at.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(at)
}

fn truncate_to_ten_minutes(at: DateTime<Utc>) -> DateTime<Utc> {
    truncate_to_minute(at)
        .with_minute(at.minute() / 10 * 10)
        .unwrap_or(at)
}
