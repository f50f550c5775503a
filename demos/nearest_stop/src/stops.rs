//! Downtown Mobile, AL bus stops.
//!
//! The feed mixes every position shape a station list shows up in: `lat`/`lng`
//! objects, GeoJSON `[lng, lat]` arrays, and sexagesimal text.

use anyhow::Result;
use serde::Deserialize;

use gd_core::PointLike;

#[derive(Debug, Deserialize)]
pub struct Stop {
    pub name: String,
    pub position: PointLike,
}

const STOPS_JSON: &str = r#"[
    { "name": "Government Plaza",     "position": { "lat": 30.6905, "lng": -88.0427 } },
    { "name": "Bienville Square",     "position": [-88.0429, 30.6917] },
    { "name": "GM&O Terminal",        "position": { "latitude": "30° 41' 11.4\" N", "longitude": "88° 2' 41.16\" W" } },
    { "name": "Cathedral Square",     "position": { "lat": "30.6922", "lon": "-88.0466" } },
    { "name": "Cooper Riverside Park","position": [-88.0385, 30.6913, 3.0] },
    { "name": "Oakleigh",             "position": { "lat": 30.6812, "lng": -88.0566 } },
    { "name": "Springhill Avenue",    "position": { "lat": 30.6968, "lng": -88.0781 } },
    { "name": "Midtown Transit Hub",  "position": { "latitude": "30° 40' 48\" N", "longitude": "88° 4' 30\" W" } }
]"#;

pub fn load_stops() -> Result<Vec<Stop>> {
    Ok(serde_json::from_str(STOPS_JSON)?)
}
