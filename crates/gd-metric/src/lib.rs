//! `gd-metric` — distances and bearings between two points.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`distance`] | `Geodesic`, `distance_vincenty`, `distance_simple`           |
//! | [`bearing`]  | Rhumb-line / great-circle bearing, compass, destination point|
//! | [`context`]  | `GeodesyContext` (cache + last computed distance)            |
//!
//! # Statelessness
//!
//! Every free function here is pure.  Callers that want sexagesimal
//! memoization or the "convert the last distance" convenience hold a
//! [`GeodesyContext`] and call its methods instead.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod bearing;
pub mod context;
pub mod distance;


pub use bearing::{
    bearing_great_circle, bearing_rhumb, compass_direction, destination_point, BearingMode,
    Cardinal, CompassDirection, CompassPoint,
};
pub use context::GeodesyContext;
pub use distance::{
    distance_simple, distance_simple_with, distance_vincenty, distance_vincenty_with, geodesic_mm,
    Geodesic,
};
