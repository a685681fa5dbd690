use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Season {
    Summer,
    Winter,
    Spring,
    Autumn,
}

impl Season {
    pub fn label(&self) -> &'static str {
        match self {
            Season::Summer => "Summer",
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Autumn => "Autumn",
        }
    }
}

/// Sun position as seen from one point on the ground at one instant.
///
/// Angles are in degrees. `air_mass` is `None` when the sun is at or below
/// the geometric horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarPosition {
    pub elevation: f64,
    pub azimuth: f64,
    pub zenith: f64,
    pub declination: f64,
    pub hour_angle: f64,
    pub air_mass: Option<f64>,
    pub is_daylight: bool,
    pub julian_day: f64,
}

/// Day/night boundary sampled at evenly spaced longitudes.
///
/// `points` holds `(longitude, latitude)` pairs in ascending longitude
/// starting at -180. The sequence is open.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerminatorCurve {
    pub points: Vec<(f64, f64)>,
    pub calculated_at: DateTime<Utc>,
}

impl TerminatorCurve {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points with the first one repeated at the end, for polygon fills.
    pub fn closed_ring(&self) -> Vec<(f64, f64)> {
        let mut ring = self.points.clone();
        if let Some(&first) = self.points.first() {
            ring.push(first);
        }
        ring
    }

    /// GeoJSON `Feature` holding the curve as an open `LineString`.
    pub fn to_geojson(&self) -> Value {
        let coordinates: Vec<[f64; 2]> = self.points.iter().map(|&(lon, lat)| [lon, lat]).collect();
        json!({
            "type": "Feature",
            "geometry": {
                "type": "LineString",
                "coordinates": coordinates,
            },
            "properties": {
                "type": "day_night_boundary",
                "calculated_at": self.calculated_at.to_rfc3339(),
            },
        })
    }
}

/// Sunrise and sunset for one date, or the polar state that rules them out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SunriseSunset {
    Times {
        sunrise: DateTime<Utc>,
        sunset: DateTime<Utc>,
        daylight_hours: f64,
    },
    PolarDay,
    PolarNight,
}

impl SunriseSunset {
    pub fn sunrise(&self) -> Option<DateTime<Utc>> {
        match self {
            SunriseSunset::Times { sunrise, .. } => Some(*sunrise),
            _ => None,
        }
    }

    pub fn sunset(&self) -> Option<DateTime<Utc>> {
        match self {
            SunriseSunset::Times { sunset, .. } => Some(*sunset),
            _ => None,
        }
    }

    pub fn daylight_hours(&self) -> Option<f64> {
        match self {
            SunriseSunset::Times { daylight_hours, .. } => Some(*daylight_hours),
            _ => None,
        }
    }

    pub fn is_polar_day(&self) -> bool {
        matches!(self, SunriseSunset::PolarDay)
    }

    pub fn is_polar_night(&self) -> bool {
        matches!(self, SunriseSunset::PolarNight)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeasonInfo {
    pub northern_hemisphere: Season,
    pub southern_hemisphere: Season,
    pub solar_declination: f64,
    pub day_of_year: u32,
    pub julian_day: f64,
}
