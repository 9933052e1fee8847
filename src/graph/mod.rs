//! Directed road network with shortest-path routing between snapped points.

#[doc(hidden)]
pub mod dijkstra;
#[doc(hidden)]
pub mod edge;
#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod network;
#[doc(hidden)]
pub mod overlay;
#[doc(hidden)]
pub mod route;

#[cfg(test)]
mod test;

#[doc(inline)]
pub use dijkstra::Dijkstra;
#[doc(inline)]
pub use edge::Edge;
#[doc(inline)]
pub use error::NetworkError;
#[doc(inline)]
pub use network::RoadNetwork;
#[doc(inline)]
pub use overlay::{RoutingOverlay, TemporaryIds};
#[doc(inline)]
pub use route::RouteResult;
