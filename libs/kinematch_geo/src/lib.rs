//! Geodesic helpers shared by the map-matching engine.

/// Equatorial radius used by the local planar projection, in meters.
pub const EQUATORIAL_RADIUS: f64 = 6378137.0;

/// Coordinates closer than this (in degrees, per axis) are treated as the same position.
pub const COINCIDENCE_EPSILON: f64 = 1e-6;

#[doc(hidden)]
pub mod distance;
#[doc(hidden)]
pub mod error;
pub mod project;

#[cfg(test)]
mod test;

#[doc(inline)]
pub use distance::*;
#[doc(inline)]
pub use error::GeoError;
#[doc(inline)]
pub use project::{LocalPlanar, closest_point_on_segment};
