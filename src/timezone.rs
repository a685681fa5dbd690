//! IANA timezone lookups via `chrono-tz`.
//!
//! Unknown identifiers surface as [`Error::UnknownTimezone`], separate from
//! anything the astronomy code can report.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::warn;

use crate::error::{Error, Result};

pub fn parse_timezone(timezone_id: &str) -> Result<Tz> {
    timezone_id.parse::<Tz>().map_err(|_| {
        warn!(timezone = timezone_id, "unknown timezone");
        Error::UnknownTimezone(timezone_id.to_string())
    })
}

pub fn local_time_at(timezone_id: &str, instant: DateTime<Utc>) -> Result<DateTime<Tz>> {
    let tz = parse_timezone(timezone_id)?;
    Ok(instant.with_timezone(&tz))
}

/// Current wall-clock time in `timezone_id`.
pub fn local_time(timezone_id: &str) -> Result<DateTime<Tz>> {
    local_time_at(timezone_id, Utc::now())
}

/// Interpret `local` as wall time in `from_tz` and express it in `to_tz`.
///
/// Wall times repeated by a DST fall-back resolve to the earlier instant.
pub fn convert_timezone(local: NaiveDateTime, from_tz: &str, to_tz: &str) -> Result<DateTime<Tz>> {
    let from = parse_timezone(from_tz)?;
    let to = parse_timezone(to_tz)?;
    let resolved = from
        .from_local_datetime(&local)
        .earliest()
        .ok_or_else(|| Error::NonexistentLocalTime {
            timezone: from_tz.to_string(),
            time: local,
        })?;
    Ok(resolved.with_timezone(&to))
}
