//! Coordinate view: resolve latitude/longitude/elevation out of a
//! [`PointLike`].
//!
//! # Key detection
//!
//! Objects are probed against a fixed alias list per axis; the first alias
//! present wins:
//!
//! | Axis       | Aliases (priority order)                     |
//! |------------|----------------------------------------------|
//! | latitude   | `lat`, `latitude`                            |
//! | longitude  | `lng`, `lon`, `longitude`                    |
//! | elevation  | `alt`, `altitude`, `elevation`, `elev`       |
//!
//! Arrays of length 2 or 3 follow GeoJSON order: `[lng, lat, elevation?]`.

use crate::point::{GeoPoint, PointLike, Scalar};
use crate::sexagesimal::{is_decimal, is_sexagesimal, DecimalParser, Uncached};
use crate::{GeoError, GeoResult};

const LAT_ALIASES: [&str; 2] = ["lat", "latitude"];
const LON_ALIASES: [&str; 3] = ["lng", "lon", "longitude"];
const ELEVATION_ALIASES: [&str; 4] = ["alt", "altitude", "elevation", "elev"];

pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

// ── Keys ──────────────────────────────────────────────────────────────────────

/// Where one axis lives inside a [`PointLike`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AxisKey {
    /// Object key (one of the static aliases).
    Name(&'static str),
    /// Array index.
    Index(usize),
}

/// Resolved key per axis.  At least one axis is always `Some`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyMap {
    pub lat: Option<AxisKey>,
    pub lon: Option<AxisKey>,
    pub elevation: Option<AxisKey>,
}

impl KeyMap {
    fn lookup<'a>(point: &'a PointLike, key: Option<AxisKey>) -> Option<&'a PointLike> {
        match key? {
            AxisKey::Name(name) => point.get(name),
            AxisKey::Index(i) => point.at(i),
        }
    }
}

/// Identify which keys (or indices) carry each axis.
///
/// Returns `None` for scalars, arrays of any length other than 2 or 3, and
/// objects where no alias of any axis is present.
pub fn detect_keys(point: &PointLike) -> Option<KeyMap> {
    match point {
        PointLike::Array(items) if items.len() == 2 || items.len() == 3 => Some(KeyMap {
            lon: Some(AxisKey::Index(0)),
            lat: Some(AxisKey::Index(1)),
            elevation: (items.len() == 3).then_some(AxisKey::Index(2)),
        }),
        PointLike::Object(map) => {
            let first = |aliases: &[&'static str]| {
                aliases.iter().copied().find(|a| map.contains_key(*a)).map(AxisKey::Name)
            };
            let keys = KeyMap {
                lat: first(&LAT_ALIASES),
                lon: first(&LON_ALIASES),
                elevation: first(&ELEVATION_ALIASES),
            };
            (keys.lat.is_some() || keys.lon.is_some() || keys.elevation.is_some()).then_some(keys)
        }
        _ => None,
    }
}

// ── Resolution ────────────────────────────────────────────────────────────────

/// Convert one axis value to decimal degrees (or metres for elevation).
///
/// `raw` skips sexagesimal handling: only numbers and plain decimal text are
/// accepted.
fn axis_decimal(value: &PointLike, raw: bool, parser: &mut dyn DecimalParser) -> GeoResult<f64> {
    match value {
        PointLike::Scalar(Scalar::Number(n)) if n.is_finite() => Ok(*n),
        PointLike::Scalar(Scalar::Text(t)) if raw => t
            .trim()
            .parse::<f64>()
            .map_err(|_| GeoError::UnknownFormat(t.clone())),
        PointLike::Scalar(Scalar::Text(t)) => parser.decimal(t),
        PointLike::Scalar(s) => Err(GeoError::UnknownFormat(s.to_string())),
        _ => Err(GeoError::InvalidFormat(
            "coordinate axis holds a nested value instead of a scalar".into(),
        )),
    }
}

/// Resolve `point` to a [`GeoPoint`], parsing text through `parser`.
pub fn coords_with(
    point: &PointLike,
    raw: bool,
    parser: &mut dyn DecimalParser,
) -> GeoResult<GeoPoint> {
    let keys = detect_keys(point)
        .ok_or_else(|| GeoError::InvalidFormat("no latitude/longitude keys found".into()))?;

    let lat = KeyMap::lookup(point, keys.lat)
        .ok_or_else(|| GeoError::InvalidFormat("latitude is missing".into()))?;
    let lon = KeyMap::lookup(point, keys.lon)
        .ok_or_else(|| GeoError::InvalidFormat("longitude is missing".into()))?;

    let elevation = match KeyMap::lookup(point, keys.elevation) {
        Some(e) => Some(axis_decimal(e, raw, parser)?),
        None => None,
    };

    let point = GeoPoint {
        lat: axis_decimal(lat, raw, parser)?,
        lon: axis_decimal(lon, raw, parser)?,
        elevation,
    };
    if raw { Ok(point) } else { point.in_range_or_err() }
}

/// Resolve `point` to a [`GeoPoint`] without memoization.
///
/// Fails with [`GeoError::InvalidFormat`] when latitude or longitude cannot
/// be located or (unless `raw`) falls outside `[-90, 90]` / `[-180, 180]`,
/// and [`GeoError::UnknownFormat`] when a value is neither decimal
/// nor sexagesimal.
pub fn coords(point: &PointLike, raw: bool) -> GeoResult<GeoPoint> {
    coords_with(point, raw, &mut Uncached)
}

pub fn latitude(point: &PointLike) -> GeoResult<f64> {
    coords(point, false).map(|p| p.lat)
}

pub fn longitude(point: &PointLike) -> GeoResult<f64> {
    coords(point, false).map(|p| p.lon)
}

/// Elevation in metres, `Ok(None)` when the point carries none.
pub fn elevation(point: &PointLike) -> GeoResult<Option<f64>> {
    match detect_keys(point).and_then(|k| KeyMap::lookup(point, k.elevation)) {
        Some(value) => axis_decimal(value, false, &mut Uncached).map(Some),
        None => Ok(None),
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

fn is_coordinate_scalar(value: &PointLike) -> bool {
    match value {
        PointLike::Scalar(Scalar::Number(n)) => n.is_finite(),
        PointLike::Scalar(Scalar::Text(t)) => is_decimal(t) || is_sexagesimal(t),
        _ => false,
    }
}

/// Like [`validate`], parsing text through `parser`.
pub fn validate_with(point: &PointLike, parser: &mut dyn DecimalParser) -> bool {
    let Some(keys) = detect_keys(point) else {
        return false;
    };
    let (Some(lat), Some(lon)) = (KeyMap::lookup(point, keys.lat), KeyMap::lookup(point, keys.lon))
    else {
        return false;
    };
    if !is_coordinate_scalar(lat) || !is_coordinate_scalar(lon) {
        return false;
    }
    match (axis_decimal(lat, false, parser), axis_decimal(lon, false, parser)) {
        (Ok(lat), Ok(lon)) => {
            (MIN_LAT..=MAX_LAT).contains(&lat) && (MIN_LON..=MAX_LON).contains(&lon)
        }
        _ => false,
    }
}

/// `true` only if latitude and longitude both resolve, normalize to decimal
/// and fall within `[-90, 90]` / `[-180, 180]`.
pub fn validate(point: &PointLike) -> bool {
    validate_with(point, &mut Uncached)
}
