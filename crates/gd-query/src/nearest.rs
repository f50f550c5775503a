//! Nearest-neighbour ordering.
//!
//! Every candidate is resolved up front (so a malformed point fails the whole
//! query before any distance work), then distances are computed per point
//! and the result is stable-sorted ascending.  Ties keep input order.  A
//! non-convergent distance sorts after every converged one.

use log::debug;

use gd_core::{GeoPoint, GeoResult, Locate};
use gd_metric::{distance_vincenty, Geodesic};

/// A candidate tagged with its original key and its distance from the
/// reference point.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderedPoint<K = usize> {
    pub key: K,
    pub point: GeoPoint,
    /// Vincenty distance in whole metres.
    pub distance: Geodesic,
}

/// Result of [`find_nearest`]: a single point when one was asked for,
/// otherwise a slice of the ordering.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Nearest<K = usize> {
    Single(OrderedPoint<K>),
    Slice(Vec<OrderedPoint<K>>),
}

impl<K> Nearest<K> {
    /// Closest entry of the result.
    pub fn first(&self) -> Option<&OrderedPoint<K>> {
        match self {
            Nearest::Single(p) => Some(p),
            Nearest::Slice(v) => v.first(),
        }
    }

    pub fn into_vec(self) -> Vec<OrderedPoint<K>> {
        match self {
            Nearest::Single(p) => vec![p],
            Nearest::Slice(v) => v,
        }
    }
}

#[cfg(not(feature = "parallel"))]
fn distances(reference: &GeoPoint, points: &[GeoPoint]) -> GeoResult<Vec<Geodesic>> {
    points.iter().map(|p| distance_vincenty(reference, p, 1.0)).collect()
}

#[cfg(feature = "parallel")]
fn distances(reference: &GeoPoint, points: &[GeoPoint]) -> GeoResult<Vec<Geodesic>> {
    use rayon::prelude::*;

    points.par_iter().map(|p| distance_vincenty(reference, p, 1.0)).collect()
}

/// Order `(key, point)` pairs by distance from `reference`.
pub fn order_by_distance_keyed<K, P, R, I>(reference: &R, points: I) -> GeoResult<Vec<OrderedPoint<K>>>
where
    R: Locate + ?Sized,
    P: Locate,
    I: IntoIterator<Item = (K, P)>,
{
    let reference = reference.locate()?;
    let (keys, located): (Vec<K>, Vec<GeoPoint>) = points
        .into_iter()
        .map(|(k, p)| p.locate().map(|g| (k, g)))
        .collect::<GeoResult<Vec<_>>>()?
        .into_iter()
        .unzip();

    let dists = distances(&reference, &located)?;

    let mut ordered: Vec<OrderedPoint<K>> = keys
        .into_iter()
        .zip(located)
        .zip(dists)
        .map(|((key, point), distance)| OrderedPoint { key, point, distance })
        .collect();
    ordered.sort_by(|a, b| a.distance.sort_key().total_cmp(&b.distance.sort_key()));

    let unresolved = ordered.iter().filter(|o| !o.distance.is_converged()).count();
    if unresolved > 0 {
        debug!("{unresolved} of {} candidates have no converged distance from {reference}", ordered.len());
    }
    Ok(ordered)
}

/// Order `points` by distance from `reference`; keys are input indices.
pub fn order_by_distance<R, P>(reference: &R, points: &[P]) -> GeoResult<Vec<OrderedPoint<usize>>>
where
    R: Locate + ?Sized,
    P: Locate,
{
    order_by_distance_keyed(reference, points.iter().enumerate())
}

/// The `offset`-th nearest point when `limit` is 1, otherwise the window
/// `[offset, offset + limit)` of the ordering (clipped to the input).
///
/// A `limit` of 0 is treated as 1.  `Ok(None)` when `offset` is past the end.
pub fn find_nearest<R, P>(
    reference: &R,
    points: &[P],
    offset: usize,
    limit: usize,
) -> GeoResult<Option<Nearest<usize>>>
where
    R: Locate + ?Sized,
    P: Locate,
{
    let mut ordered = order_by_distance(reference, points)?;
    if offset >= ordered.len() {
        return Ok(None);
    }

    let limit = limit.max(1);
    if limit == 1 {
        return Ok(Some(Nearest::Single(ordered.swap_remove(offset))));
    }

    let end = offset.saturating_add(limit).min(ordered.len());
    ordered.truncate(end);
    ordered.drain(..offset);
    Ok(Some(Nearest::Slice(ordered)))
}
