use chrono::{DateTime, Datelike, TimeZone, Utc};

use crate::angles;
use crate::types::{Season, SeasonInfo};

/// Coarse (northern, southern) season labels for a day of the year.
///
/// Windows are anchored near the March equinox (day 80), June solstice
/// (172), September equinox (266) and December solstice (355).
pub fn hemisphere_seasons(day_of_year: u32) -> (Season, Season) {
    if day_of_year < 80 || day_of_year > 355 {
        (Season::Winter, Season::Summer)
    } else if day_of_year < 172 {
        (Season::Spring, Season::Autumn)
    } else if day_of_year < 266 {
        (Season::Summer, Season::Winter)
    } else {
        (Season::Autumn, Season::Spring)
    }
}

pub fn season_info<Tz: TimeZone>(dt: &DateTime<Tz>) -> SeasonInfo {
    let utc = dt.with_timezone(&Utc);
    let jd = angles::julian_day(&utc);
    let doy = angles::day_of_year(utc.year(), utc.month(), utc.day());
    let (northern, southern) = hemisphere_seasons(doy);
    SeasonInfo {
        northern_hemisphere: northern,
        southern_hemisphere: southern,
        solar_declination: angles::solar_declination(jd),
        day_of_year: doy,
        julian_day: jd,
    }
}
