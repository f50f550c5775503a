//! Distance unit table.
//!
//! Metres are the only unit ever stored; every other unit is derived at the
//! call site by multiplying with [`Unit::per_meter`].

use std::fmt;
use std::str::FromStr;

use crate::{GeoError, GeoResult};

/// Decimal places [`convert_unit`] rounds to unless told otherwise.
pub const DEFAULT_DECIMALS: u32 = 4;

/// A physical distance unit.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    #[default]
    Meters,
    Kilometers,
    Centimeters,
    Millimeters,
    /// Statute mile.
    Miles,
    /// Sea mile.
    NauticalMiles,
    Feet,
    Inches,
    Yards,
}

impl Unit {
    pub const ALL: [Unit; 9] = [
        Unit::Meters,
        Unit::Kilometers,
        Unit::Centimeters,
        Unit::Millimeters,
        Unit::Miles,
        Unit::NauticalMiles,
        Unit::Feet,
        Unit::Inches,
        Unit::Yards,
    ];

    /// Number of this unit in one metre.
    pub fn per_meter(self) -> f64 {
        match self {
            Unit::Meters        => 1.0,
            Unit::Kilometers    => 0.001,
            Unit::Centimeters   => 100.0,
            Unit::Millimeters   => 1000.0,
            Unit::Miles         => 1.0 / 1609.344,
            Unit::NauticalMiles => 1.0 / 1852.216,
            Unit::Feet          => 100.0 / 30.48,
            Unit::Inches        => 100.0 / 2.54,
            Unit::Yards         => 1.0 / 0.9144,
        }
    }

    /// Short symbol accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Meters        => "m",
            Unit::Kilometers    => "km",
            Unit::Centimeters   => "cm",
            Unit::Millimeters   => "mm",
            Unit::Miles         => "mi",
            Unit::NauticalMiles => "sm",
            Unit::Feet          => "ft",
            Unit::Inches        => "in",
            Unit::Yards         => "yd",
        }
    }

    /// Convert `meters` into this unit, rounded to `decimals` places.
    #[inline]
    pub fn convert(self, meters: f64, decimals: u32) -> f64 {
        round_to(meters * self.per_meter(), decimals)
    }
}

impl FromStr for Unit {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::ALL
            .into_iter()
            .find(|u| u.as_str() == s)
            .ok_or_else(|| GeoError::UnknownUnit(s.to_owned()))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Round `value` to `decimals` places (half away from zero).
#[inline]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Convert a distance in metres to `unit`, rounded to `decimals` places.
///
/// ```
/// assert_eq!(gd_core::convert_unit("km", 1500.0, 4).unwrap(), 1.5);
/// assert!(gd_core::convert_unit("zz", 1500.0, 4).is_err());
/// ```
pub fn convert_unit(unit: &str, distance_m: f64, decimals: u32) -> GeoResult<f64> {
    Ok(unit.parse::<Unit>()?.convert(distance_m, decimals))
}
