//! Geographic point type and the loosely shaped input it is built from.
//!
//! Callers hand the engines points in whatever shape they already hold:
//! a typed [`GeoPoint`], a GeoJSON `[lng, lat, elev?]` array, or a
//! [`PointLike`] decoded from JSON with `lat`/`lng`/`latitude`/... keys whose
//! values may be numbers, decimal strings or sexagesimal strings.  The
//! [`Locate`] trait is the single seam every engine goes through to obtain a
//! `GeoPoint`.

use std::collections::BTreeMap;
use std::fmt;

use crate::coords::coords_with;
use crate::sexagesimal::{DecimalParser, Uncached};
use crate::{GeoError, GeoResult};

// ── GeoPoint ──────────────────────────────────────────────────────────────────

/// A WGS-84 geographic coordinate in decimal degrees with optional elevation
/// in metres.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
    pub elevation: Option<f64>,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon, elevation: None }
    }

    #[inline]
    pub fn with_elevation(lat: f64, lon: f64, elevation: f64) -> Self {
        Self { lat, lon, elevation: Some(elevation) }
    }

    /// `true` when latitude and longitude are inside `[-90, 90]` and
    /// `[-180, 180]`.
    #[inline]
    pub fn in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }

    /// `self` when [`in_range`](Self::in_range), otherwise
    /// [`GeoError::InvalidFormat`].
    pub fn in_range_or_err(self) -> GeoResult<Self> {
        if self.in_range() {
            Ok(self)
        } else {
            Err(GeoError::InvalidFormat(format!(
                "coordinate out of range: lat {} lon {}",
                self.lat, self.lon
            )))
        }
    }

    #[inline]
    pub fn lat_rad(&self) -> f64 {
        self.lat.to_radians()
    }

    #[inline]
    pub fn lon_rad(&self) -> f64 {
        self.lon.to_radians()
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.elevation {
            Some(e) => write!(f, "({:.6}, {:.6}, {:.1} m)", self.lat, self.lon, e),
            None => write!(f, "({:.6}, {:.6})", self.lat, self.lon),
        }
    }
}

// ── PointLike ─────────────────────────────────────────────────────────────────

/// A leaf value inside a [`PointLike`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::Text(t) => f.write_str(t),
        }
    }
}

/// Untyped point input: an object with aliased keys, an ordered array, or a
/// bare scalar.
///
/// Only [`PointLike::Object`] takes part in key-alias probing; arrays use
/// GeoJSON index order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum PointLike {
    Scalar(Scalar),
    Array(Vec<PointLike>),
    Object(BTreeMap<String, PointLike>),
}

impl PointLike {
    /// Build an object from `(key, value)` pairs.
    pub fn object<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<PointLike>,
        I: IntoIterator<Item = (K, V)>,
    {
        PointLike::Object(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// `{ "lat": lat, "lng": lng }`, the shape most station feeds use.
    pub fn lat_lng(lat: f64, lng: f64) -> Self {
        Self::object([("lat", lat), ("lng", lng)])
    }

    /// Look up a key on an object; `None` for every other variant.
    pub fn get(&self, key: &str) -> Option<&PointLike> {
        match self {
            PointLike::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Element at `index` of an array; `None` for every other variant.
    pub fn at(&self, index: usize) -> Option<&PointLike> {
        match self {
            PointLike::Array(items) => items.get(index),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            PointLike::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric value of a `Scalar::Number`, `None` otherwise.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PointLike::Scalar(Scalar::Number(n)) => Some(*n),
            _ => None,
        }
    }
}

impl From<f64> for PointLike {
    fn from(n: f64) -> Self {
        PointLike::Scalar(Scalar::Number(n))
    }
}

impl From<&str> for PointLike {
    fn from(s: &str) -> Self {
        PointLike::Scalar(Scalar::Text(s.to_owned()))
    }
}

impl From<String> for PointLike {
    fn from(s: String) -> Self {
        PointLike::Scalar(Scalar::Text(s))
    }
}

impl From<Scalar> for PointLike {
    fn from(s: Scalar) -> Self {
        PointLike::Scalar(s)
    }
}

impl From<Vec<PointLike>> for PointLike {
    fn from(items: Vec<PointLike>) -> Self {
        PointLike::Array(items)
    }
}

impl From<GeoPoint> for PointLike {
    /// Canonical object form: `{ latitude, longitude[, elevation] }`.
    fn from(p: GeoPoint) -> Self {
        let mut map = BTreeMap::new();
        map.insert("latitude".to_owned(), p.lat.into());
        map.insert("longitude".to_owned(), p.lon.into());
        if let Some(e) = p.elevation {
            map.insert("elevation".to_owned(), e.into());
        }
        PointLike::Object(map)
    }
}

// ── Locate ────────────────────────────────────────────────────────────────────

/// Anything that can be resolved to a [`GeoPoint`].
///
/// Engines are generic over `Locate` so that typed and untyped inputs share
/// one code path.  `locate_with` threads a [`DecimalParser`] through so a
/// caller-owned cache can memoize sexagesimal parsing.
pub trait Locate {
    fn locate_with(&self, parser: &mut dyn DecimalParser) -> GeoResult<GeoPoint>;

    /// Resolve without memoization.
    fn locate(&self) -> GeoResult<GeoPoint> {
        self.locate_with(&mut Uncached)
    }
}

impl Locate for GeoPoint {
    #[inline]
    fn locate_with(&self, _parser: &mut dyn DecimalParser) -> GeoResult<GeoPoint> {
        Ok(*self)
    }
}

impl Locate for PointLike {
    fn locate_with(&self, parser: &mut dyn DecimalParser) -> GeoResult<GeoPoint> {
        coords_with(self, false, parser)
    }
}

/// GeoJSON position `[lng, lat]`; out-of-range positions are rejected.
impl Locate for [f64; 2] {
    #[inline]
    fn locate_with(&self, _parser: &mut dyn DecimalParser) -> GeoResult<GeoPoint> {
        GeoPoint::new(self[1], self[0]).in_range_or_err()
    }
}

/// GeoJSON position `[lng, lat, elevation]`.
impl Locate for [f64; 3] {
    #[inline]
    fn locate_with(&self, _parser: &mut dyn DecimalParser) -> GeoResult<GeoPoint> {
        GeoPoint::with_elevation(self[1], self[0], self[2]).in_range_or_err()
    }
}

impl<T: Locate + ?Sized> Locate for &T {
    #[inline]
    fn locate_with(&self, parser: &mut dyn DecimalParser) -> GeoResult<GeoPoint> {
        (**self).locate_with(parser)
    }
}
