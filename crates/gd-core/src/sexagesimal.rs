//! Decimal ⇄ sexagesimal (degree/minute/second) codec.
//!
//! # Accepted text
//!
//! ```text
//! 51° 30' 26.5" N      51°30'N      8° 41.25' E      40° 30' 0" O
//! ```
//!
//! Degrees take 1–3 digits, minutes and seconds 1–3 digits with up to two
//! decimals; seconds and the hemisphere letter are optional.  `S` and `W`
//! negate the value.  `O` (Ouest) is accepted as a direction marker but does
//! **not** negate, for compatibility with existing French-locale data.
//!
//! # Memoization
//!
//! Parsing is cheap but station lists repeat the same strings thousands of
//! times.  [`SexagesimalCache`] memoizes both directions; it is owned by the
//! caller (usually inside a `GeodesyContext`) and never evicts.

use std::collections::BTreeMap;

use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashMap;

use crate::coords::{coords_with, validate_with};
use crate::point::{PointLike, Scalar};
use crate::units::round_to;
use crate::{GeoError, GeoResult};

static SEXAGESIMAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^([0-9]{1,3})°\s*([0-9]{1,3}(?:\.[0-9]{1,2})?)'\s*(?:([0-9]{1,3}(?:\.[0-9]{1,2})?)"\s*)?([NEOSW]?)$"#,
    )
    .expect("sexagesimal pattern is valid")
});

/// Decimal places kept when converting sexagesimal text to degrees.
const DECIMAL_PLACES: u32 = 8;

// ── Predicates ────────────────────────────────────────────────────────────────

/// `true` if the trimmed text parses entirely as a finite float.
pub fn is_decimal(text: &str) -> bool {
    text.trim().parse::<f64>().is_ok_and(f64::is_finite)
}

/// `true` if the trimmed text matches the sexagesimal pattern.
pub fn is_sexagesimal(text: &str) -> bool {
    SEXAGESIMAL_RE.is_match(text.trim())
}

// ── Conversion ────────────────────────────────────────────────────────────────

fn parse_sexagesimal(text: &str) -> Option<f64> {
    let caps = SEXAGESIMAL_RE.captures(text.trim())?;
    let deg: f64 = caps[1].parse().ok()?;
    let min: f64 = caps[2].parse().ok()?;
    let sec: f64 = match caps.get(3) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0.0,
    };

    let value = round_to(deg + min / 60.0 + sec / 3600.0, DECIMAL_PLACES);
    Some(match &caps[4] {
        "S" | "W" => -value,
        _ => value,
    })
}

/// Convert decimal or sexagesimal text to decimal degrees.
pub fn to_decimal(text: &str) -> GeoResult<f64> {
    if is_decimal(text) {
        return text.trim().parse().map_err(|_| GeoError::UnknownFormat(text.to_owned()));
    }
    parse_sexagesimal(text).ok_or_else(|| GeoError::UnknownFormat(text.to_owned()))
}

/// `(degrees, minutes, seconds)` of `|decimal|`, seconds unrounded.
fn split_dms(decimal: f64) -> (u64, u64, f64) {
    let abs = decimal.abs();
    let deg = abs.trunc();
    let min_f = (abs - deg) * 60.0;
    let min = min_f.floor();
    (deg as u64, min as u64, (min_f - min) * 60.0)
}

/// Format decimal degrees as `D° M' S.SS"`.
///
/// No hemisphere letter is written, so negative inputs do not round-trip
/// through [`to_decimal`]; use [`to_sexagesimal_hemisphere`] for that.
pub fn to_sexagesimal(decimal: f64) -> String {
    let (deg, min, sec) = split_dms(decimal);
    format!("{deg}° {min}' {sec:.2}\"")
}

/// Which axis a bare decimal belongs to, for choosing a hemisphere letter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Latitude,
    Longitude,
}

/// Format decimal degrees as `D° M' S.SS" H`, with `H` one of `N/S` or
/// `E/W`.  The output parses back with [`to_decimal`].
pub fn to_sexagesimal_hemisphere(decimal: f64, axis: Axis) -> String {
    let letter = match (axis, decimal < 0.0) {
        (Axis::Latitude, false) => 'N',
        (Axis::Latitude, true) => 'S',
        (Axis::Longitude, false) => 'E',
        (Axis::Longitude, true) => 'W',
    };
    format!("{} {letter}", to_sexagesimal(decimal))
}

// ── Parser seam ───────────────────────────────────────────────────────────────

/// Converts coordinate text to decimal degrees.
///
/// Implemented by [`Uncached`] (stateless) and [`SexagesimalCache`].
pub trait DecimalParser {
    fn decimal(&mut self, text: &str) -> GeoResult<f64>;
}

/// Stateless parser: every call runs [`to_decimal`].
#[derive(Copy, Clone, Debug, Default)]
pub struct Uncached;

impl DecimalParser for Uncached {
    #[inline]
    fn decimal(&mut self, text: &str) -> GeoResult<f64> {
        to_decimal(text)
    }
}

/// Memoizes sexagesimal → decimal and decimal → sexagesimal conversions.
///
/// Keys are the exact input text (and the exact `f64` bit pattern for the
/// reverse direction).  Plain decimal text bypasses the cache.
#[derive(Clone, Debug, Default)]
pub struct SexagesimalCache {
    decimals: FxHashMap<String, f64>,
    sexagesimals: FxHashMap<u64, String>,
}

impl SexagesimalCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_decimal(&mut self, text: &str) -> GeoResult<f64> {
        if is_decimal(text) {
            return to_decimal(text);
        }
        if let Some(&value) = self.decimals.get(text) {
            trace!("sexagesimal cache hit for {text:?}");
            return Ok(value);
        }
        let value = parse_sexagesimal(text).ok_or_else(|| GeoError::UnknownFormat(text.to_owned()))?;
        self.decimals.insert(text.to_owned(), value);
        Ok(value)
    }

    pub fn to_sexagesimal(&mut self, decimal: f64) -> String {
        self.sexagesimals
            .entry(decimal.to_bits())
            .or_insert_with(|| to_sexagesimal(decimal))
            .clone()
    }

    /// Total number of memoized conversions in both directions.
    pub fn len(&self) -> usize {
        self.decimals.len() + self.sexagesimals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.decimals.clear();
        self.sexagesimals.clear();
    }
}

impl DecimalParser for SexagesimalCache {
    #[inline]
    fn decimal(&mut self, text: &str) -> GeoResult<f64> {
        self.to_decimal(text)
    }
}

// ── use_decimal ──────────────────────────────────────────────────────────────

fn scalar_decimal(scalar: &Scalar, parser: &mut dyn DecimalParser) -> GeoResult<f64> {
    match scalar {
        Scalar::Number(n) if n.is_finite() => Ok(*n),
        Scalar::Number(n) => Err(GeoError::UnknownFormat(n.to_string())),
        Scalar::Text(t) => parser.decimal(t),
    }
}

/// Like [`use_decimal`], parsing text through `parser`.
pub fn use_decimal_with(value: &PointLike, parser: &mut dyn DecimalParser) -> GeoResult<PointLike> {
    match value {
        PointLike::Scalar(s) => scalar_decimal(s, parser).map(PointLike::from),
        PointLike::Array(items) => items
            .iter()
            .map(|item| use_decimal_with(item, parser))
            .collect::<GeoResult<Vec<_>>>()
            .map(PointLike::Array),
        PointLike::Object(_) if validate_with(value, parser) => {
            coords_with(value, false, parser).map(PointLike::from)
        }
        PointLike::Object(map) => map
            .iter()
            .map(|(k, v)| Ok((k.clone(), use_decimal_with(v, parser)?)))
            .collect::<GeoResult<BTreeMap<_, _>>>()
            .map(PointLike::Object),
    }
}

/// Recursively normalize every coordinate inside `value` to decimal degrees.
///
/// - scalars become numbers;
/// - arrays are normalized element-wise;
/// - valid point objects become canonical `{latitude, longitude[, elevation]}`
///   objects;
/// - other objects are normalized value by value.
///
/// Any scalar that is neither decimal nor sexagesimal fails with
/// [`GeoError::UnknownFormat`].
pub fn use_decimal(value: &PointLike) -> GeoResult<PointLike> {
    use_decimal_with(value, &mut Uncached)
}
