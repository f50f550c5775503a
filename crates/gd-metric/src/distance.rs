//! Point-to-point distance.
//!
//! # Two engines
//!
//! | Function              | Model                 | Use                         |
//! |-----------------------|-----------------------|-----------------------------|
//! | [`distance_vincenty`] | WGS-84 ellipsoid      | Default; sub-millimetre     |
//! | [`distance_simple`]   | Sphere, R = 6378137 m | Cheap fallback / prefilter  |
//!
//! # Accuracy buckets
//!
//! Both engines finish with `floor(round(d / accuracy) * accuracy)`, so the
//! result is a whole number of metres snapped to the caller's bucket size.
//! `accuracy` is floored; anything below 1 means 1.
//!
//! # Non-convergence
//!
//! The Vincenty iteration can fail to converge for nearly antipodal points.
//! That is reported as [`Geodesic::NonConvergent`], never as an error and
//! never as NaN, so it cannot be summed or averaged without being handled.

use std::fmt;
use std::iter::Sum;

use log::debug;

use gd_core::{round_to, Ellipsoid, GeoPoint, GeoResult, GeodesyConfig, Locate};

// ── Geodesic ──────────────────────────────────────────────────────────────────

/// Outcome of an ellipsoidal computation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Geodesic<T = f64> {
    /// The solver converged; the payload is the value (metres unless noted).
    Converged(T),
    /// The Vincenty iteration hit its cap without converging.
    NonConvergent,
}

impl<T> Geodesic<T> {
    #[inline]
    pub fn is_converged(&self) -> bool {
        matches!(self, Geodesic::Converged(_))
    }

    #[inline]
    pub fn value(self) -> Option<T> {
        match self {
            Geodesic::Converged(v) => Some(v),
            Geodesic::NonConvergent => None,
        }
    }

    #[inline]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Geodesic<U> {
        match self {
            Geodesic::Converged(v) => Geodesic::Converged(f(v)),
            Geodesic::NonConvergent => Geodesic::NonConvergent,
        }
    }

    #[inline]
    pub fn unwrap_or(self, default: T) -> T {
        self.value().unwrap_or(default)
    }

    /// Take the converged value or compute a fallback (e.g. the spherical
    /// distance).
    #[inline]
    pub fn unwrap_or_else(self, fallback: impl FnOnce() -> T) -> T {
        self.value().unwrap_or_else(fallback)
    }
}

impl Geodesic<f64> {
    /// Ordering key: converged values first, `NonConvergent` last.
    #[inline]
    pub fn sort_key(self) -> f64 {
        self.unwrap_or(f64::INFINITY)
    }
}

/// Sum of legs; a single non-convergent leg makes the total non-convergent.
impl Sum for Geodesic<f64> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Geodesic::Converged(0.0), |acc, leg| match (acc, leg) {
            (Geodesic::Converged(a), Geodesic::Converged(b)) => Geodesic::Converged(a + b),
            _ => Geodesic::NonConvergent,
        })
    }
}

impl<T: fmt::Display> fmt::Display for Geodesic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Geodesic::Converged(v) => v.fmt(f),
            Geodesic::NonConvergent => f.write_str("non-convergent"),
        }
    }
}

// ── Accuracy buckets ──────────────────────────────────────────────────────────

#[inline]
pub(crate) fn normalize_accuracy(accuracy: f64) -> f64 {
    let a = accuracy.floor();
    if a >= 1.0 { a } else { 1.0 }
}

#[inline]
pub(crate) fn bucket(meters: f64, accuracy: f64) -> f64 {
    let accuracy = normalize_accuracy(accuracy);
    ((meters / accuracy).round() * accuracy).floor()
}

// ── Spherical ─────────────────────────────────────────────────────────────────

/// Spherical law of cosines, rounded to whole metres.
pub(crate) fn spherical_m(start: &GeoPoint, end: &GeoPoint, radius_m: f64) -> f64 {
    let (lat1, lat2) = (start.lat_rad(), end.lat_rad());
    let cos_angle = lat2.sin() * lat1.sin()
        + lat2.cos() * lat1.cos() * (start.lon_rad() - end.lon_rad()).cos();
    // Rounding can push the cosine a hair past ±1 for (near-)identical points.
    (cos_angle.clamp(-1.0, 1.0).acos() * radius_m).round()
}

/// Like [`distance_simple`] with an explicit configuration.
pub fn distance_simple_with<A, B>(
    start: &A,
    end: &B,
    accuracy: f64,
    config: &GeodesyConfig,
) -> GeoResult<f64>
where
    A: Locate + ?Sized,
    B: Locate + ?Sized,
{
    let (s, e) = (start.locate()?, end.locate()?);
    Ok(bucket(spherical_m(&s, &e, config.sphere_radius_m), accuracy))
}

/// Approximate distance in metres on a sphere of radius 6 378 137 m.
///
/// Uses the spherical law of cosines (not haversine):
///
/// ```text
/// d = acos(sin φ2·sin φ1 + cos φ2·cos φ1·cos(λ1 − λ2)) · R
/// ```
pub fn distance_simple<A, B>(start: &A, end: &B, accuracy: f64) -> GeoResult<f64>
where
    A: Locate + ?Sized,
    B: Locate + ?Sized,
{
    distance_simple_with(start, end, accuracy, &GeodesyConfig::default())
}

// ── Vincenty ──────────────────────────────────────────────────────────────────

/// Converged state of the λ iteration.
struct Converged {
    sin_sigma: f64,
    cos_sigma: f64,
    sigma: f64,
    cos_sq_alpha: f64,
    cos_2sigma_m: f64,
}

/// Vincenty inverse solution, rounded to the millimetre, before accuracy
/// bucketing.
///
/// When both points carry an elevation the ellipsoidal distance `d` and the
/// climb `Δh` are combined as `sqrt(d² + Δh²)`.  Coincident points return
/// `Converged(0.0)` immediately.
pub fn geodesic_mm(start: &GeoPoint, end: &GeoPoint, config: &GeodesyConfig) -> Geodesic {
    // Canonical order keeps d(P, Q) and d(Q, P) bit-identical.
    let (start, end) = if (end.lat, end.lon) < (start.lat, start.lon) {
        (end, start)
    } else {
        (start, end)
    };
    let Ellipsoid { semi_minor_m: b, flattening: f, .. } = config.ellipsoid;

    let l = (end.lon - start.lon).to_radians();
    let u1 = ((1.0 - f) * start.lat_rad().tan()).atan();
    let u2 = ((1.0 - f) * end.lat_rad().tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    let mut state = None;

    for _ in 0..config.max_iterations {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        let cross = cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda;
        let sin_sigma = ((cos_u2 * sin_lambda).powi(2) + cross * cross).sqrt();
        if sin_sigma == 0.0 {
            return Geodesic::Converged(0.0);
        }

        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        let sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        // Both points on the equator: cos²α = 0.
        let cos_2sigma_m = if cos_sq_alpha == 0.0 {
            0.0
        } else {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        };

        let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
        let lambda_prev = lambda;
        lambda = l
            + (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));

        if (lambda - lambda_prev).abs() <= config.convergence_threshold {
            state = Some(Converged { sin_sigma, cos_sigma, sigma, cos_sq_alpha, cos_2sigma_m });
            break;
        }
    }

    let Some(Converged { sin_sigma, cos_sigma, sigma, cos_sq_alpha, cos_2sigma_m }) = state else {
        debug!(
            "vincenty did not converge after {} iterations between {start} and {end}",
            config.max_iterations
        );
        return Geodesic::NonConvergent;
    };

    let u_sq = cos_sq_alpha * config.ellipsoid.second_eccentricity_sq();
    let big_a = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
    let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
    let delta_sigma = big_b
        * sin_sigma
        * (cos_2sigma_m
            + big_b / 4.0
                * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)
                    - big_b / 6.0
                        * cos_2sigma_m
                        * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                        * (-3.0 + 4.0 * cos_2sigma_m * cos_2sigma_m)));

    let mut meters = round_to(b * big_a * (sigma - delta_sigma), 3);

    if let (Some(h1), Some(h2)) = (start.elevation, end.elevation) {
        let climb = (h1 - h2).abs();
        meters = (meters * meters + climb * climb).sqrt();
    }

    Geodesic::Converged(meters)
}

/// Like [`distance_vincenty`] with an explicit configuration.
pub fn distance_vincenty_with<A, B>(
    start: &A,
    end: &B,
    accuracy: f64,
    config: &GeodesyConfig,
) -> GeoResult<Geodesic>
where
    A: Locate + ?Sized,
    B: Locate + ?Sized,
{
    let (s, e) = (start.locate()?, end.locate()?);
    Ok(geodesic_mm(&s, &e, config).map(|m| bucket(m, accuracy)))
}

/// Ellipsoidal (WGS-84) distance in metres, snapped to `accuracy`.
///
/// ```
/// use gd_core::GeoPoint;
/// use gd_metric::{distance_vincenty, Geodesic};
///
/// // One degree of longitude along the equator.
/// let a = GeoPoint::new(0.0, 0.0);
/// let b = GeoPoint::new(0.0, 1.0);
/// assert_eq!(distance_vincenty(&a, &b, 1.0).unwrap(), Geodesic::Converged(111_319.0));
/// ```
pub fn distance_vincenty<A, B>(start: &A, end: &B, accuracy: f64) -> GeoResult<Geodesic>
where
    A: Locate + ?Sized,
    B: Locate + ?Sized,
{
    distance_vincenty_with(start, end, accuracy, &GeodesyConfig::default())
}
