//! Bounding boxes.

use std::f64::consts::TAU;

use gd_core::coords::{MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};
use gd_core::{round_to, GeoPoint, GeoResult, Locate, Unit, DEFAULT_DECIMALS, EARTH_RADIUS_M};
use gd_metric::{distance_vincenty, Geodesic};

/// Axis-aligned extent of a point collection, in decimal degrees.
///
/// Elevation bounds are present only when the first point of the collection
/// carries an elevation; they then span every point that has one.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_elevation: Option<f64>,
    pub max_elevation: Option<f64>,
}

impl Bounds {
    #[inline]
    pub fn contains(&self, p: &GeoPoint) -> bool {
        (self.min_lat..=self.max_lat).contains(&p.lat) && (self.min_lon..=self.max_lon).contains(&p.lon)
    }

    pub fn south_west(&self) -> GeoPoint {
        GeoPoint::new(self.min_lat, self.min_lon)
    }

    pub fn north_east(&self) -> GeoPoint {
        GeoPoint::new(self.max_lat, self.max_lon)
    }
}

/// Extent of `points`; `Ok(None)` for an empty collection.
pub fn bounds<P: Locate>(points: &[P]) -> GeoResult<Option<Bounds>> {
    let mut located = points.iter().map(Locate::locate);
    let Some(first) = located.next().transpose()? else {
        return Ok(None);
    };

    let mut b = Bounds {
        min_lat: first.lat,
        max_lat: first.lat,
        min_lon: first.lon,
        max_lon: first.lon,
        min_elevation: first.elevation,
        max_elevation: first.elevation,
    };
    let track_elevation = first.elevation.is_some();

    for p in located {
        let p = p?;
        b.min_lat = b.min_lat.min(p.lat);
        b.max_lat = b.max_lat.max(p.lat);
        b.min_lon = b.min_lon.min(p.lon);
        b.max_lon = b.max_lon.max(p.lon);
        if let (true, Some(e)) = (track_elevation, p.elevation) {
            b.min_elevation = b.min_elevation.map(|m| m.min(e));
            b.max_elevation = b.max_elevation.map(|m| m.max(e));
        }
    }

    Ok(Some(b))
}

/// Midpoint of a bounding box plus the length of its diagonal.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
    /// Vincenty distance from the south-west to the north-east corner, km.
    pub diagonal_km: Geodesic,
}

impl Center {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}

/// Centre of the bounding box of `points` (not the centroid of the points),
/// rounded to 6 decimals, with the box diagonal in kilometres.
pub fn center<P: Locate>(points: &[P]) -> GeoResult<Option<Center>> {
    let Some(b) = bounds(points)? else {
        return Ok(None);
    };
    let diagonal = distance_vincenty(&b.south_west(), &b.north_east(), 1.0)?;
    Ok(Some(Center {
        lat: round_to((b.min_lat + b.max_lat) / 2.0, 6),
        lon: round_to((b.min_lon + b.max_lon) / 2.0, 6),
        diagonal_km: diagonal.map(|m| Unit::Kilometers.convert(m, DEFAULT_DECIMALS)),
    }))
}

/// South-west and north-east corners of a box containing every point within
/// `radius_m` of `point` on the 6 378 137 m sphere.
///
/// Near a pole the latitude is clamped and the box spans all longitudes.
/// Across the antimeridian the returned west longitude is greater than the
/// east one; callers must treat the box as wrapping.
pub fn bounds_of_distance<P: Locate + ?Sized>(point: &P, radius_m: f64) -> GeoResult<(GeoPoint, GeoPoint)> {
    let p = point.locate()?;
    let (lat, lon) = (p.lat_rad(), p.lon_rad());
    let angular = radius_m / EARTH_RADIUS_M;

    let min_lat = (lat - angular).to_degrees();
    let max_lat = (lat + angular).to_degrees();

    if min_lat <= MIN_LAT || max_lat >= MAX_LAT {
        return Ok((
            GeoPoint::new(min_lat.max(MIN_LAT), MIN_LON),
            GeoPoint::new(max_lat.min(MAX_LAT), MAX_LON),
        ));
    }

    let delta_lon = (angular.sin() / lat.cos()).asin();
    let mut west = lon - delta_lon;
    if west < MIN_LON.to_radians() {
        west += TAU;
    }
    let mut east = lon + delta_lon;
    if east > MAX_LON.to_radians() {
        east -= TAU;
    }

    Ok((
        GeoPoint::new(min_lat, west.to_degrees()),
        GeoPoint::new(max_lat, east.to_degrees()),
    ))
}
