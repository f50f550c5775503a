//! Caller-owned geodesy state.
//!
//! [`GeodesyContext`] bundles the three things that would otherwise be
//! process-wide: the numeric configuration, the sexagesimal memoization
//! cache, and the "last computed distance" slot that lets
//! [`convert_unit`](GeodesyContext::convert_unit) run without an explicit
//! distance.
//!
//! Methods take `&mut self`; share a context between threads behind a
//! `Mutex`, or give each worker its own.

use gd_core::{GeoPoint, GeoResult, GeodesyConfig, Locate, SexagesimalCache, Unit};

use crate::distance::{bucket, geodesic_mm, spherical_m, Geodesic};

/// Configuration, memoization cache and last computed distance.
#[derive(Clone, Debug, Default)]
pub struct GeodesyContext {
    config: GeodesyConfig,
    cache: SexagesimalCache,
    last_distance: Option<f64>,
}

impl GeodesyContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GeodesyConfig) -> Self {
        Self { config, ..Self::default() }
    }

    pub fn config(&self) -> &GeodesyConfig {
        &self.config
    }

    pub fn cache(&self) -> &SexagesimalCache {
        &self.cache
    }

    /// Drop every memoized conversion.  The last distance is kept.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Most recent distance produced by this context, if any.
    pub fn last_distance(&self) -> Option<f64> {
        self.last_distance
    }

    // ── Codec ─────────────────────────────────────────────────────────────

    /// Resolve a point, parsing sexagesimal text through the cache.
    pub fn locate<P: Locate + ?Sized>(&mut self, point: &P) -> GeoResult<GeoPoint> {
        point.locate_with(&mut self.cache)
    }

    pub fn to_decimal(&mut self, text: &str) -> GeoResult<f64> {
        self.cache.to_decimal(text)
    }

    pub fn to_sexagesimal(&mut self, decimal: f64) -> String {
        self.cache.to_sexagesimal(decimal)
    }

    // ── Distance ──────────────────────────────────────────────────────────

    /// Vincenty distance; a converged result becomes the last distance.
    pub fn distance_vincenty<A, B>(&mut self, start: &A, end: &B, accuracy: f64) -> GeoResult<Geodesic>
    where
        A: Locate + ?Sized,
        B: Locate + ?Sized,
    {
        let (s, e) = (self.locate(start)?, self.locate(end)?);
        let result = geodesic_mm(&s, &e, &self.config).map(|m| bucket(m, accuracy));
        if let Geodesic::Converged(m) = result {
            self.last_distance = Some(m);
        }
        Ok(result)
    }

    /// Spherical distance; the result becomes the last distance.
    pub fn distance_simple<A, B>(&mut self, start: &A, end: &B, accuracy: f64) -> GeoResult<f64>
    where
        A: Locate + ?Sized,
        B: Locate + ?Sized,
    {
        let (s, e) = (self.locate(start)?, self.locate(end)?);
        let m = bucket(spherical_m(&s, &e, self.config.sphere_radius_m), accuracy);
        self.last_distance = Some(m);
        Ok(m)
    }

    /// Convert `distance_m` (or, when `None`, the last computed distance,
    /// 0 if there is none yet) to `unit`.
    pub fn convert_unit(&self, unit: &str, distance_m: Option<f64>, decimals: u32) -> GeoResult<f64> {
        let unit: Unit = unit.parse()?;
        let meters = distance_m.or(self.last_distance).unwrap_or(0.0);
        Ok(unit.convert(meters, decimals))
    }
}
