//! Paths: length, speed and point-to-segment distance.

use std::str::FromStr;

use gd_core::{DecimalParser, GeoError, GeoPoint, GeoResult, GeodesyConfig, Locate, Unit};
use gd_metric::{distance_vincenty, geodesic_mm, Geodesic};

/// Sum of Vincenty leg distances (whole metres) along `points` in the order
/// given.  Fewer than two points yield `Converged(0.0)`.
pub fn path_length<P: Locate>(points: &[P]) -> GeoResult<Geodesic> {
    let located = points.iter().map(Locate::locate).collect::<GeoResult<Vec<_>>>()?;
    located
        .windows(2)
        .map(|leg| distance_vincenty(&leg[0], &leg[1], 1.0))
        .sum::<GeoResult<Geodesic>>()
}

// ── Speed ─────────────────────────────────────────────────────────────────────

/// A position stamped with a time in milliseconds since an arbitrary epoch.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedPoint<P = GeoPoint> {
    pub point: P,
    pub time_ms: i64,
}

impl<P> TimedPoint<P> {
    pub fn new(point: P, time_ms: i64) -> Self {
        Self { point, time_ms }
    }
}

impl<P: Locate> Locate for TimedPoint<P> {
    fn locate_with(&self, parser: &mut dyn DecimalParser) -> GeoResult<GeoPoint> {
        self.point.locate_with(parser)
    }
}

/// Distance unit of a speed, per hour.  Parses every [`Unit`] plus the
/// aliases `kmh` and `mph`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeedUnit(pub Unit);

impl Default for SpeedUnit {
    fn default() -> Self {
        SpeedUnit(Unit::Kilometers)
    }
}

impl From<Unit> for SpeedUnit {
    fn from(unit: Unit) -> Self {
        SpeedUnit(unit)
    }
}

impl FromStr for SpeedUnit {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let canonical = match s {
            "kmh" => "km",
            "mph" => "mi",
            other => other,
        };
        canonical.parse().map(SpeedUnit)
    }
}

/// Average speed between two timestamped points, in `unit` per hour,
/// rounded to 4 decimals.
///
/// Fails with [`GeoError::InvalidTimespan`] when both timestamps are equal
/// or their difference overflows `i64`.
/// A negative timespan gives a negative speed.
pub fn speed<A, B>(start: &TimedPoint<A>, end: &TimedPoint<B>, unit: SpeedUnit) -> GeoResult<Geodesic>
where
    A: Locate,
    B: Locate,
{
    let elapsed_ms = end
        .time_ms
        .checked_sub(start.time_ms)
        .filter(|&ms| ms != 0)
        .ok_or(GeoError::InvalidTimespan)?;
    let hours = elapsed_ms as f64 / 3_600_000.0;
    let distance = distance_vincenty(start, end, 1.0)?;
    Ok(distance.map(|m| unit.0.convert(m / hours, 4)))
}

// ── Segments ──────────────────────────────────────────────────────────────────

fn legs(point: &GeoPoint, start: &GeoPoint, end: &GeoPoint) -> Option<(f64, f64, f64)> {
    let config = GeodesyConfig::default();
    let d1 = geodesic_mm(start, point, &config).value()?;
    let d2 = geodesic_mm(point, end, &config).value()?;
    let d3 = geodesic_mm(start, end, &config).value()?;
    Some((d1, d2, d3))
}

/// Shortest distance in metres from `point` to the segment `start`–`end`.
///
/// Solves the planar triangle of the three pairwise Vincenty distances.
/// When the foot of the perpendicular falls outside the segment the distance
/// to the nearer endpoint is returned instead.
pub fn distance_from_line<A, B, C>(point: &A, start: &B, end: &C) -> GeoResult<Geodesic>
where
    A: Locate + ?Sized,
    B: Locate + ?Sized,
    C: Locate + ?Sized,
{
    let (p, s, e) = (point.locate()?, start.locate()?, end.locate()?);
    let Some((d1, d2, d3)) = legs(&p, &s, &e) else {
        return Ok(Geodesic::NonConvergent);
    };

    if d1 == 0.0 || d2 == 0.0 {
        return Ok(Geodesic::Converged(0.0));
    }
    if d3 == 0.0 {
        return Ok(Geodesic::Converged(d1));
    }

    let alpha = ((d1 * d1 + d3 * d3 - d2 * d2) / (2.0 * d1 * d3)).clamp(-1.0, 1.0).acos();
    let beta = ((d2 * d2 + d3 * d3 - d1 * d1) / (2.0 * d2 * d3)).clamp(-1.0, 1.0).acos();

    let d = if alpha > std::f64::consts::FRAC_PI_2 {
        d1
    } else if beta > std::f64::consts::FRAC_PI_2 {
        d2
    } else {
        alpha.sin() * d1
    };
    Ok(Geodesic::Converged(d))
}

/// `true` when `point` is within `distance_m` of the segment `start`–`end`.
pub fn is_point_near_line<A, B, C>(point: &A, start: &B, end: &C, distance_m: f64) -> GeoResult<bool>
where
    A: Locate + ?Sized,
    B: Locate + ?Sized,
    C: Locate + ?Sized,
{
    Ok(match distance_from_line(point, start, end)? {
        Geodesic::Converged(d) => d < distance_m,
        Geodesic::NonConvergent => false,
    })
}

/// Slack allowed between the two legs and the segment, one millimetre of
/// rounding per leg.
const IN_LINE_TOLERANCE_M: f64 = 0.002;

/// `true` when `point` lies on the segment `start`–`end`: the two legs
/// through `point` add up to the segment length.
pub fn is_point_in_line<A, B, C>(point: &A, start: &B, end: &C) -> GeoResult<bool>
where
    A: Locate + ?Sized,
    B: Locate + ?Sized,
    C: Locate + ?Sized,
{
    let (p, s, e) = (point.locate()?, start.locate()?, end.locate()?);
    Ok(legs(&p, &s, &e).is_some_and(|(d1, d2, d3)| (d1 + d2 - d3).abs() <= IN_LINE_TOLERANCE_M))
}
