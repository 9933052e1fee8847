//! Collaborator-facing formats of the map matcher.
//!
//! Road networks, spatial grids and traces arrive as JSON Lines files,
//! matched paths leave as GPX tracks.

#[doc(hidden)]
pub mod error;
pub mod gpx;
#[doc(hidden)]
pub mod lines;
pub mod grid;
pub mod network;
pub mod speed;
pub mod trace;

#[cfg(test)]
mod test;

#[doc(inline)]
pub use error::CodecError;
#[doc(inline)]
pub use grid::{CellRecord, EndpointRecord, GridBoundsRecord, GridFile, SegmentRecord, read_grid};
#[doc(inline)]
pub use network::{EdgeRecord, NodeRecord, read_network};
#[doc(inline)]
pub use speed::SpeedValue;
#[doc(inline)]
pub use trace::{TraceRecord, read_trace};
