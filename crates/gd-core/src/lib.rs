//! `gd-core` — point model and coordinate parsing for the geodesy workspace.
//!
//! Every other `gd-*` crate builds on this one.  It owns everything needed
//! to turn loosely shaped input (JSON objects, GeoJSON arrays, DMS text)
//! into a typed [`GeoPoint`].
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`point`]       | `GeoPoint`, `PointLike`, `Scalar`, `Locate` trait         |
//! | [`coords`]      | Key detection, `coords`, `validate`, axis accessors       |
//! | [`sexagesimal`] | Decimal ⇄ DMS codec, `DecimalParser`, `SexagesimalCache`  |
//! | [`units`]       | `Unit` table, `convert_unit`, `round_to`                  |
//! | [`config`]      | `Ellipsoid`, `GeodesyConfig`                              |
//! | [`error`]       | `GeoError`, `GeoResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on public types; `PointLike` is  |
//! |         | untagged, so any JSON point shape deserializes into it.    |

pub mod config;
pub mod coords;
pub mod error;
pub mod point;
pub mod sexagesimal;
pub mod units;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{Ellipsoid, GeodesyConfig, EARTH_RADIUS_M};
pub use coords::{coords, coords_with, detect_keys, validate, validate_with, AxisKey, KeyMap};
pub use error::{GeoError, GeoResult};
pub use point::{GeoPoint, Locate, PointLike, Scalar};
pub use sexagesimal::{
    is_decimal, is_sexagesimal, to_decimal, to_sexagesimal, to_sexagesimal_hemisphere,
    use_decimal, use_decimal_with, Axis, DecimalParser, SexagesimalCache, Uncached,
};
pub use units::{convert_unit, round_to, Unit, DEFAULT_DECIMALS};
