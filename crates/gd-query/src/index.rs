//! R-tree over a fixed station list, for "every stop within r metres".
//!
//! The tree stores `[lat, lon]` degrees.  A radius query first takes the
//! [`bounds_of_distance`] box (slightly inflated, since that box is computed
//! on a sphere and WGS-84 degrees can be shorter) as a coarse filter, then
//! keeps only candidates whose Vincenty distance is strictly below the
//! radius.  A box crossing the antimeridian is queried as two envelopes.

use log::debug;
use rstar::{RTree, RTreeObject, AABB};

use gd_core::coords::{MAX_LON, MIN_LON};
use gd_core::{GeoPoint, GeoResult, Locate};
use gd_metric::{distance_vincenty, Geodesic};

use crate::bounds::bounds_of_distance;
use crate::nearest::OrderedPoint;

/// Coarse-filter inflation over the spherical box.
const ENVELOPE_SLACK: f64 = 1.01;

#[derive(Clone, Debug)]
struct Entry {
    point: [f64; 2], // [lat, lon]
    index: usize,
}

impl RTreeObject for Entry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

/// Immutable spatial index over a list of points.  Query results carry the
/// input index of each point as their key.
pub struct PointIndex {
    points: Vec<GeoPoint>,
    tree: RTree<Entry>,
}

impl PointIndex {
    /// Resolve every point and bulk-load the tree.
    pub fn new<P: Locate>(points: &[P]) -> GeoResult<Self> {
        let points = points.iter().map(Locate::locate).collect::<GeoResult<Vec<_>>>()?;
        let entries = points
            .iter()
            .enumerate()
            .map(|(index, p)| Entry { point: [p.lat, p.lon], index })
            .collect();
        Ok(Self { tree: RTree::bulk_load(entries), points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Resolved point at input position `index`.
    pub fn point(&self, index: usize) -> Option<&GeoPoint> {
        self.points.get(index)
    }

    /// Points strictly closer than `radius_m` to `center`, nearest first.
    /// Equal distances keep input order.
    pub fn within_radius<C: Locate + ?Sized>(&self, center: &C, radius_m: f64) -> GeoResult<Vec<OrderedPoint<usize>>> {
        let center = center.locate()?;
        let (sw, ne) = bounds_of_distance(&center, radius_m * ENVELOPE_SLACK)?;

        let envelopes = if sw.lon > ne.lon {
            vec![
                AABB::from_corners([sw.lat, sw.lon], [ne.lat, MAX_LON]),
                AABB::from_corners([sw.lat, MIN_LON], [ne.lat, ne.lon]),
            ]
        } else {
            vec![AABB::from_corners([sw.lat, sw.lon], [ne.lat, ne.lon])]
        };

        let mut candidates: Vec<usize> = envelopes
            .iter()
            .flat_map(|env| self.tree.locate_in_envelope(env).map(|e| e.index))
            .collect();
        candidates.sort_unstable();
        candidates.dedup();

        let mut hits = Vec::with_capacity(candidates.len());
        for index in candidates.iter().copied() {
            let point = self.points[index];
            if let Geodesic::Converged(d) = distance_vincenty(&center, &point, 1.0)? {
                if d < radius_m {
                    hits.push(OrderedPoint { key: index, point, distance: Geodesic::Converged(d) });
                }
            }
        }
        hits.sort_by(|a, b| a.distance.sort_key().total_cmp(&b.distance.sort_key()));

        debug!(
            "radius {radius_m} m around {center}: {} candidates, {} hits",
            candidates.len(),
            hits.len()
        );
        Ok(hits)
    }
}
