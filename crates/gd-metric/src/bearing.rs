//! Bearings, compass directions and the spherical direct problem.
//!
//! All bearings are in degrees clockwise from true north, normalized to
//! `[0, 360)`.

use std::f64::consts::{FRAC_PI_4, PI, TAU};
use std::fmt;
use std::str::FromStr;

use gd_core::{GeoError, GeoPoint, GeoResult, Locate};

#[inline]
fn normalize_degrees(radians: f64) -> f64 {
    (radians.to_degrees() + 360.0) % 360.0
}

/// Constant-heading (loxodrome) bearing from `origin` to `dest`.
///
/// The longitude difference is wrapped into `(−π, π]` so the rhumb line
/// never goes the long way around.
pub fn bearing_rhumb<A, B>(origin: &A, dest: &B) -> GeoResult<f64>
where
    A: Locate + ?Sized,
    B: Locate + ?Sized,
{
    let (o, d) = (origin.locate()?, dest.locate()?);

    let mut d_lon = d.lon_rad() - o.lon_rad();
    let d_phi = ((d.lat_rad() / 2.0 + FRAC_PI_4).tan() / (o.lat_rad() / 2.0 + FRAC_PI_4).tan()).ln();

    if d_lon.abs() > PI {
        d_lon = if d_lon > 0.0 { -(TAU - d_lon) } else { TAU + d_lon };
    }

    Ok(normalize_degrees(d_lon.atan2(d_phi)))
}

/// Initial great-circle bearing from `origin` to `dest`.
pub fn bearing_great_circle<A, B>(origin: &A, dest: &B) -> GeoResult<f64>
where
    A: Locate + ?Sized,
    B: Locate + ?Sized,
{
    let (o, d) = (origin.locate()?, dest.locate()?);
    let (lat1, lat2) = (o.lat_rad(), d.lat_rad());
    let d_lon = d.lon_rad() - o.lon_rad();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
    Ok(normalize_degrees(y.atan2(x)))
}

// ── Compass ───────────────────────────────────────────────────────────────────

/// Which bearing a compass direction is derived from.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BearingMode {
    #[default]
    RhumbLine,
    Circle,
}

impl FromStr for BearingMode {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rhumbline" => Ok(BearingMode::RhumbLine),
            "circle" => Ok(BearingMode::Circle),
            other => Err(GeoError::InvalidFormat(format!(
                "unknown bearing mode {other:?}: expected \"rhumbline\" or \"circle\""
            ))),
        }
    }
}

/// One of the 16 points of the compass rose.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompassPoint {
    N, NNE, NE, ENE, E, ESE, SE, SSE, S, SSW, SW, WSW, W, WNW, NW, NNW,
}

/// One of the four cardinal points.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cardinal {
    N, E, S, W,
}

impl CompassPoint {
    /// Clockwise from north, one per 22.5° sector.
    pub const ALL: [CompassPoint; 16] = {
        use CompassPoint::*;
        [N, NNE, NE, ENE, E, ESE, SE, SSE, S, SSW, SW, WSW, W, WNW, NW, NNW]
    };

    /// Sector containing `bearing` (degrees): `round(bearing / 22.5) mod 16`.
    pub fn from_bearing(bearing: f64) -> CompassPoint {
        let sector = (bearing / 22.5).round().rem_euclid(16.0) as usize;
        Self::ALL[sector % 16]
    }

    /// Coarse quadrant.  Intercardinals fold clockwise onto the preceding
    /// cardinal (`NE → N`, `SE → E`, `SW → S`, `NW → W`).
    pub fn rough(self) -> Cardinal {
        use CompassPoint::*;
        match self {
            N | NNE | NE | NNW => Cardinal::N,
            ENE | E | ESE | SE => Cardinal::E,
            SSE | S | SSW | SW => Cardinal::S,
            WSW | W | WNW | NW => Cardinal::W,
        }
    }

    pub fn as_str(self) -> &'static str {
        use CompassPoint::*;
        match self {
            N => "N", NNE => "NNE", NE => "NE", ENE => "ENE",
            E => "E", ESE => "ESE", SE => "SE", SSE => "SSE",
            S => "S", SSW => "SSW", SW => "SW", WSW => "WSW",
            W => "W", WNW => "WNW", NW => "NW", NNW => "NNW",
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl Cardinal {
    pub fn as_str(self) -> &'static str {
        match self {
            Cardinal::N => "N",
            Cardinal::E => "E",
            Cardinal::S => "S",
            Cardinal::W => "W",
        }
    }
}

impl fmt::Display for Cardinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Result of [`compass_direction`].
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompassDirection {
    pub exact: CompassPoint,
    pub rough: Cardinal,
    /// The bearing the direction was derived from, in degrees.
    pub bearing: f64,
}

/// Compass direction from `origin` to `dest`.
pub fn compass_direction<A, B>(origin: &A, dest: &B, mode: BearingMode) -> GeoResult<CompassDirection>
where
    A: Locate + ?Sized,
    B: Locate + ?Sized,
{
    let bearing = match mode {
        BearingMode::Circle => bearing_great_circle(origin, dest)?,
        BearingMode::RhumbLine => bearing_rhumb(origin, dest)?,
    };
    let exact = CompassPoint::from_bearing(bearing);
    Ok(CompassDirection { exact, rough: exact.rough(), bearing })
}

// ── Direct problem ────────────────────────────────────────────────────────────

/// Point reached by travelling `distance_m` from `start` along an initial
/// great-circle `bearing_deg`, on a sphere of `radius_m`.
///
/// Longitude is normalized to `[-180, 180)`.
pub fn destination_point<A>(start: &A, distance_m: f64, bearing_deg: f64, radius_m: f64) -> GeoResult<GeoPoint>
where
    A: Locate + ?Sized,
{
    let s = start.locate()?;
    let delta = distance_m / radius_m;
    let theta = bearing_deg.to_radians();
    let (lat1, lon1) = (s.lat_rad(), s.lon_rad());

    let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).asin();
    let lon2 = lon1
        + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());
    let lon2 = (lon2 + 3.0 * PI).rem_euclid(TAU) - PI;

    Ok(GeoPoint::new(lat2.to_degrees(), lon2.to_degrees()))
}
