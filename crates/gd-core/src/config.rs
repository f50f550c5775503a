//! Reference ellipsoid and solver configuration.
//!
//! # Design
//!
//! Every numeric constant the distance engines depend on is collected in
//! [`GeodesyConfig`].  The free functions in `gd-metric` use
//! `GeodesyConfig::default()` (WGS-84, 100 Vincenty iterations, 1e-12 rad
//! tolerance); callers that need another datum or a tighter iteration budget
//! build their own and use the `*_with` variants or a `GeodesyContext`.

/// Equatorial radius used for every spherical approximation, in metres.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

// ── Ellipsoid ────────────────────────────────────────────────────────────────

/// Reference ellipsoid parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ellipsoid {
    /// Semi-major axis `a` in metres.
    pub semi_major_m: f64,
    /// Semi-minor axis `b` in metres.
    pub semi_minor_m: f64,
    /// Flattening `f`.
    pub flattening: f64,
}

impl Ellipsoid {
    /// World Geodetic System 1984.
    pub const WGS84: Ellipsoid = Ellipsoid {
        semi_major_m: 6_378_137.0,
        semi_minor_m: 6_356_752.314245,
        flattening: 1.0 / 298.257223563,
    };

    /// Second-eccentricity factor `(a² − b²) / b²` used by the Vincenty
    /// `u²` term.
    #[inline]
    pub fn second_eccentricity_sq(&self) -> f64 {
        let a2 = self.semi_major_m * self.semi_major_m;
        let b2 = self.semi_minor_m * self.semi_minor_m;
        (a2 - b2) / b2
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS84
    }
}

// ── GeodesyConfig ────────────────────────────────────────────────────────────

/// Numeric configuration for the distance and bearing engines.
///
/// Typically left at its default; applications may load it from a JSON/TOML
/// file (with the `serde` feature) to switch datum.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeodesyConfig {
    /// Ellipsoid for the Vincenty inverse solution.
    pub ellipsoid: Ellipsoid,

    /// Sphere radius for the spherical law of cosines, bounding boxes and
    /// destination points.  Default: [`EARTH_RADIUS_M`].
    pub sphere_radius_m: f64,

    /// Hard cap on Vincenty iterations before giving up.  Default: 100.
    pub max_iterations: u32,

    /// Convergence threshold on successive λ values, in radians.
    /// Default: 1e-12.
    pub convergence_threshold: f64,
}

impl Default for GeodesyConfig {
    fn default() -> Self {
        Self {
            ellipsoid: Ellipsoid::WGS84,
            sphere_radius_m: EARTH_RADIUS_M,
            max_iterations: 100,
            convergence_threshold: 1e-12,
        }
    }
}
