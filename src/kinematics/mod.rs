//! Piecewise speed-over-distance curves and the feasibility calculus
//! built upon them.
//!
//! A [`Profile`] describes the maximum achievable speed `U(x)` along a
//! route. Given the time elapsed between two fixes, [`Profile::speed_interval`]
//! answers which speeds the vehicle may have at the end of that route.
//!
//! Speeds are in meters per second, distances in meters, accelerations
//! in meters per second squared.

#[doc(hidden)]
pub mod builder;
#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod interval;
#[doc(hidden)]
pub mod piece;
#[doc(hidden)]
pub mod profile;
#[doc(hidden)]
pub mod search;


#[doc(inline)]
pub use builder::PathSegment;
#[doc(inline)]
pub use error::ProfileError;
#[doc(inline)]
pub use interval::SpeedInterval;
#[doc(inline)]
pub use piece::{Motion, Piece};
#[doc(inline)]
pub use profile::Profile;
#[doc(inline)]
pub use search::Bisection;
