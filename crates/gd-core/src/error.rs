//! Geodesy error type.
//!
//! Format and unit errors are programming or data errors upstream and are
//! returned immediately.  Numeric non-convergence of the Vincenty solver is
//! *not* an error; `gd-metric` reports it through its `Geodesic` sum type.

use thiserror::Error;

/// The error type shared by all `gd-*` crates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    /// A point could not be resolved to latitude/longitude (missing keys,
    /// wrong shape).
    #[error("invalid point format: {0}")]
    InvalidFormat(String),

    /// A scalar coordinate is neither a decimal nor a sexagesimal value.
    #[error("unknown coordinate format: {0:?}")]
    UnknownFormat(String),

    /// Unit string not present in the conversion table.
    #[error("unknown unit for conversion: {0:?}")]
    UnknownUnit(String),

    /// Two timed fixes share the same timestamp, so no speed exists.
    #[error("elapsed time between fixes is zero")]
    InvalidTimespan,
}

/// Shorthand result type for all `gd-*` crates.
pub type GeoResult<T> = Result<T, GeoError>;
