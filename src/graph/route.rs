use crate::graph::Edge;
use crate::primitives::NodeId;
use geo::Point;

/// Outcome of a shortest-path query.
///
/// An unreachable target is reported with an infinite distance and
/// an empty path, never as an error.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    pub distance: f64,
    pub path: Vec<NodeId>,
    /// Position of every node along `path`, temporary nodes included.
    pub positions: Vec<Point>,
    /// The arcs joining consecutive nodes of `path`.
    pub edges: Vec<Edge>,
}

impl RouteResult {
    pub fn unreachable() -> Self {
        RouteResult {
            distance: f64::INFINITY,
            path: vec![],
            positions: vec![],
            edges: vec![],
        }
    }

    #[inline]
    pub fn is_reachable(&self) -> bool {
        self.distance.is_finite() && !self.path.is_empty()
    }
}
