use std::sync::Arc;

use chrono::{Datelike, Utc};

use sky_globe::{CacheConfig, SolarEngine, TtlCache, DEFAULT_POINT_COUNT};

fn main() -> sky_globe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = CacheConfig::from_env();
    let engine = SolarEngine::new(Arc::new(TtlCache::new(config)));

    let (latitude, longitude) = (35.68, 139.69);
    let now = Utc::now();
    let today = now.date_naive();

    let pos = engine.get_sun_position(latitude, longitude, now);
    println!("=== Sun over Tokyo ({:.2}°N, {:.2}°E) ===", latitude, longitude);
    println!("UTC: {}", now.to_rfc3339());
    match engine.get_local_time("Asia/Tokyo") {
        Ok(local) => println!("Local: {}", local.format("%Y-%m-%d %H:%M:%S %Z")),
        Err(e) => println!("Local: unavailable ({})", e),
    }
    println!("Elevation: {:.2}°", pos.elevation);
    println!("Azimuth: {:.2}° (0°=N, 90°=E)", pos.azimuth);
    println!("Declination: {:.2}°", pos.declination);
    println!("Hour angle: {:.2}°", pos.hour_angle);
    match pos.air_mass {
        Some(am) => println!("Air mass: {:.2}", am),
        None => println!("Air mass: n/a (sun below horizon)"),
    }
    println!("Daylight: {}", pos.is_daylight);
    println!();

    let times = engine.calculate_sunrise_sunset(latitude, longitude, today);
    println!("--- {} ---", today);
    if times.is_polar_day() {
        println!("Polar day");
    } else if times.is_polar_night() {
        println!("Polar night");
    } else if let (Some(rise), Some(set), Some(hours)) =
        (times.sunrise(), times.sunset(), times.daylight_hours())
    {
        println!("Sunrise: {} UTC", rise.format("%H:%M:%S"));
        println!("Sunset:  {} UTC", set.format("%H:%M:%S"));
        println!("Daylight: {:.2} h", hours);
    }
    println!("Solar noon: {} UTC", engine.solar_noon(longitude, today).format("%H:%M:%S"));
    println!();

    let season = engine.get_season_info(now);
    println!(
        "Day {} of {}: north {}, south {}",
        season.day_of_year,
        now.year(),
        season.northern_hemisphere.label(),
        season.southern_hemisphere.label()
    );
    println!();

    let curve = engine.calculate_day_night_boundary(now, DEFAULT_POINT_COUNT);
    println!("--- Terminator ({} points) ---", curve.len());
    for (lon, lat) in curve.points.iter().step_by(45) {
        println!("{:>8.1}° lon -> {:>7.2}° lat", lon, lat);
    }
    // Second call lands in the same 10-minute bucket.
    engine.calculate_day_night_boundary(now, DEFAULT_POINT_COUNT);
    println!();

    let stats = engine.cache().stats();
    println!("--- Cache ---");
    println!(
        "entries={} hits={} misses={} hit_rate={:.2}%",
        stats.total_entries, stats.hits, stats.misses, stats.hit_rate_percent
    );
    for (category, count) in engine.cache().size_by_category() {
        println!("  {}: {}", category, count);
    }
    Ok(())
}
