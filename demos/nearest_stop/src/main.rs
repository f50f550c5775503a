//! nearest_stop — "which bus stop is closest to me?" against a small
//! downtown Mobile, AL stop list.
//!
//! Set `RUST_LOG=debug` (or `trace`) to see index and cache activity.

mod stops;

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use gd_core::{to_sexagesimal_hemisphere, Axis, GeoPoint};
use gd_metric::{compass_direction, BearingMode, GeodesyContext};
use gd_query::{center, find_nearest, path_length, speed, Center, Nearest, OrderedPoint, PointIndex, TimedPoint};

use stops::load_stops;

// ── Constants ─────────────────────────────────────────────────────────────────

const WALK_RADIUS_M: f64 = 800.0;
const NEAREST_COUNT: usize = 3;
const FIX_INTERVAL_MS: i64 = 240_000; // two GPS fixes, 4 minutes apart

#[derive(Serialize)]
struct Report<'a> {
    rider: GeoPoint,
    nearest: &'a OrderedPoint<usize>,
    walkable: &'a [OrderedPoint<usize>],
    center: Option<Center>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== nearest_stop — Mobile, AL ===");

    // 1. Stop list, resolved through a caching context.
    let stops = load_stops()?;
    let mut ctx = GeodesyContext::new();
    let points = stops
        .iter()
        .map(|s| ctx.locate(&s.position).with_context(|| format!("stop {:?}", s.name)))
        .collect::<Result<Vec<GeoPoint>>>()?;
    info!("resolved {} stops ({} memoized conversions)", points.len(), ctx.cache().len());

    // 2. Rider position: two fixes from a device.
    let first_fix = TimedPoint::new(GeoPoint::new(30.6880, -88.0500), 0);
    let second_fix = TimedPoint::new(GeoPoint::new(30.6925, -88.0440), FIX_INTERVAL_MS);
    let rider = second_fix.point;
    println!(
        "Rider at {}, {}",
        to_sexagesimal_hemisphere(rider.lat, Axis::Latitude),
        to_sexagesimal_hemisphere(rider.lon, Axis::Longitude),
    );
    println!("Rider speed: {} km/h", speed(&first_fix, &second_fix, "kmh".parse()?)?);
    println!();

    // 3. Closest few stops, with direction.
    let Some(Nearest::Slice(closest)) = find_nearest(&rider, &points, 0, NEAREST_COUNT)? else {
        anyhow::bail!("stop list is empty");
    };
    println!("{:<24} {:>10} {:>6} {:>6}", "Stop", "Distance", "Dir", "Rough");
    println!("{}", "-".repeat(50));
    for hit in &closest {
        let dir = compass_direction(&rider, &hit.point, BearingMode::default())?;
        println!(
            "{:<24} {:>8} m {:>6} {:>6}",
            stops[hit.key].name, hit.distance, dir.exact, dir.rough
        );
    }
    println!();

    let nearest = &closest[0];
    ctx.distance_vincenty(&rider, &nearest.point, 1.0)?;
    println!(
        "Nearest: {} ({} ft)",
        stops[nearest.key].name,
        ctx.convert_unit("ft", None, 0)?
    );

    // 4. Everything within walking distance.
    let index = PointIndex::new(&points)?;
    let walkable = index.within_radius(&rider, WALK_RADIUS_M)?;
    println!("Within {WALK_RADIUS_M} m: {}", walkable.len());
    for hit in &walkable {
        println!("  {:<24} {} m", stops[hit.key].name, hit.distance);
    }

    // 5. A downtown loop through the first four stops and back.
    let mut route = points[..4].to_vec();
    route.push(points[0]);
    let route_km = path_length(&route)?.map(|m| m / 1_000.0);
    println!("Downtown loop: {route_km} km");
    println!();

    // 6. Machine-readable summary.
    let report = Report { rider, nearest, walkable: &walkable, center: center(&points)? };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
