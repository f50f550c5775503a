//! `gd-query` — questions asked of point collections.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`bounds`]  | `Bounds`, `Center`, `bounds`, `center`, `bounds_of_distance`    |
//! | [`polygon`] | `point_in_polygon`, `PreparedPolygon`, `point_in_circle`        |
//! | [`nearest`] | `OrderedPoint`, `order_by_distance`, `find_nearest`             |
//! | [`path`]    | `path_length`, `speed`, point-to-segment distance               |
//! | [`index`]   | `PointIndex` (R-tree) for radius queries over station lists     |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                       |
//! |------------|--------------------------------------------------------------|
//! | `parallel` | Per-point distances computed on Rayon's pool.                |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.           |

pub mod bounds;
pub mod index;
pub mod nearest;
pub mod path;
pub mod polygon;

#[cfg(test)]
mod tests;

pub use bounds::{bounds, bounds_of_distance, center, Bounds, Center};
pub use index::PointIndex;
pub use nearest::{find_nearest, order_by_distance, order_by_distance_keyed, Nearest, OrderedPoint};
pub use path::{
    distance_from_line, is_point_in_line, is_point_near_line, path_length, speed, SpeedUnit,
    TimedPoint,
};
pub use polygon::{point_in_circle, point_in_polygon, PreparedPolygon};
