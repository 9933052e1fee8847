#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod graph;
pub mod grid;
pub mod kinematics;
pub mod primitives;
pub mod reconstruct;
pub mod trellis;
pub mod util;

#[doc(inline)]
pub use config::MatchConfig;
#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use graph::RoadNetwork;
#[doc(inline)]
pub use grid::StreetGrid;
#[doc(inline)]
pub use primitives::TimedPosition;
#[doc(inline)]
pub use reconstruct::{MatchedPath, PathReconstructor};
#[doc(inline)]
pub use trellis::{Lattice, MatchOutcome, Trellis};
