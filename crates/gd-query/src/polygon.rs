//! Containment tests: polygons and circles.
//!
//! Polygons are given as an ordered vertex ring; the ring closes implicitly
//! from the last vertex back to the first.  The test is even-odd ray casting
//! with longitude as the scan axis and no winding normalization, so vertices
//! must be supplied in ring order (either direction), not as an unordered set.

use gd_core::{GeoPoint, GeoResult, Locate};
use gd_metric::{distance_vincenty, Geodesic};

/// Even-odd test of `point` against the ring `vertices`.
///
/// Points exactly on an edge may land on either side.
pub fn point_in_polygon<A, P>(point: &A, vertices: &[P]) -> GeoResult<bool>
where
    A: Locate + ?Sized,
    P: Locate,
{
    let p = point.locate()?;
    let ring = vertices.iter().map(Locate::locate).collect::<GeoResult<Vec<_>>>()?;
    Ok(crossings_odd(&p, &ring))
}

fn crossings_odd(p: &GeoPoint, ring: &[GeoPoint]) -> bool {
    let Some(mut prev) = ring.last() else {
        return false;
    };
    let mut inside = false;
    for cur in ring {
        let spans = (cur.lon <= p.lon && p.lon < prev.lon) || (prev.lon <= p.lon && p.lon < cur.lon);
        if spans && p.lat < (prev.lat - cur.lat) * (p.lon - cur.lon) / (prev.lon - cur.lon) + cur.lat {
            inside = !inside;
        }
        prev = cur;
    }
    inside
}

/// A polygon with its edge equations precomputed, for testing many points
/// against the same ring.
///
/// Each edge `i` (from vertex `i - 1` to vertex `i`) is stored as
/// `lat = constant[i] + multiple[i] * lon`; vertical edges get a zero slope.
#[derive(Clone, Debug)]
pub struct PreparedPolygon {
    vertices: Vec<GeoPoint>,
    constant: Vec<f64>,
    multiple: Vec<f64>,
}

impl PreparedPolygon {
    pub fn new<P: Locate>(vertices: &[P]) -> GeoResult<Self> {
        let vertices = vertices.iter().map(Locate::locate).collect::<GeoResult<Vec<_>>>()?;
        let n = vertices.len();
        let mut constant = Vec::with_capacity(n);
        let mut multiple = Vec::with_capacity(n);

        for i in 0..n {
            let cur = &vertices[i];
            let prev = &vertices[(i + n - 1) % n];
            if prev.lon == cur.lon {
                constant.push(cur.lat);
                multiple.push(0.0);
            } else {
                let run = prev.lon - cur.lon;
                constant.push(cur.lat - cur.lon * prev.lat / run + cur.lon * cur.lat / run);
                multiple.push((prev.lat - cur.lat) / run);
            }
        }

        Ok(Self { vertices, constant, multiple })
    }

    pub fn vertices(&self) -> &[GeoPoint] {
        &self.vertices
    }

    /// Same answer as [`point_in_polygon`] away from edges.
    pub fn contains<A: Locate + ?Sized>(&self, point: &A) -> GeoResult<bool> {
        let p = point.locate()?;
        let n = self.vertices.len();
        let mut inside = false;
        for i in 0..n {
            let cur = &self.vertices[i];
            let prev = &self.vertices[(i + n - 1) % n];
            if (cur.lon > p.lon) != (prev.lon > p.lon) {
                inside ^= p.lon * self.multiple[i] + self.constant[i] > p.lat;
            }
        }
        Ok(inside)
    }
}

/// `true` when `point` is strictly closer than `radius_m` to `center`
/// (Vincenty, metre accuracy).  A non-convergent distance counts as outside.
pub fn point_in_circle<A, B>(point: &A, center: &B, radius_m: f64) -> GeoResult<bool>
where
    A: Locate + ?Sized,
    B: Locate + ?Sized,
{
    Ok(match distance_vincenty(point, center, 1.0)? {
        Geodesic::Converged(d) => d < radius_m,
        Geodesic::NonConvergent => false,
    })
}
