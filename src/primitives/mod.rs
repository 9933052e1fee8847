//! Values shared between the spatial index, the road network and the trellis.

#[doc(hidden)]
pub mod position;
#[doc(hidden)]
pub mod segment;

#[doc(inline)]
pub use position::*;
#[doc(inline)]
pub use segment::*;

/// Identifier of a node within the road network.
/// Negative values are reserved for temporary nodes.
pub type NodeId = i64;

/// Identifier of the way (road) a segment or edge belongs to.
pub type WayId = i64;
