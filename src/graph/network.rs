use crate::graph::{Edge, NetworkError, RouteResult, RoutingOverlay};
use crate::primitives::{ClosestStreetResult, NodeId};

use codec::NodeRecord;
use geo::Point;
use kinematch_geo::checked_point;
use log::{debug, info, warn};
use petgraph::Direction;
use petgraph::prelude::DiGraphMap;
use rustc_hash::FxHashMap;
use std::fmt::{Debug, Formatter};
#[cfg(feature = "tracing")]
use tracing::Level;

/// Edges shorter than this (meters) are treated as zero-length.
pub const ZERO_LENGTH: f64 = 1e-6;

pub type GraphStructure = DiGraphMap<NodeId, Edge>;

/// Directed road network. Nodes and edges are fixed once loaded; the
/// temporary nodes needed to route between snapped positions live in a
/// [`RoutingOverlay`] owned by each query.
#[derive(Default)]
pub struct RoadNetwork {
    pub(crate) graph: GraphStructure,
    pub(crate) positions: FxHashMap<NodeId, Point>,
}

impl Debug for RoadNetwork {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RoadNetwork with Nodes: {}, Edges: {}",
            self.positions.len(),
            self.graph.edge_count()
        )
    }
}

impl RoadNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> usize {
        self.positions.len()
    }

    pub fn add_node(&mut self, id: NodeId, position: Point) {
        self.graph.add_node(id);
        self.positions.insert(id, position);
    }

    /// Adds a directed arc. Self-loops and zero-length arcs are reported
    /// and left out of the network, in which case `false` is returned.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, edge: Edge) -> bool {
        if from == to {
            warn!("Skipping self-loop on node {from} (way {})", edge.way_id);
            return false;
        }

        if !(edge.distance > ZERO_LENGTH) {
            warn!(
                "Skipping zero-length edge {from} -> {to} (way {}, distance {})",
                edge.way_id, edge.distance
            );
            return false;
        }

        self.graph.add_edge(from, to, edge);
        true
    }

    #[inline]
    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.positions.get(&id).copied()
    }

    #[inline]
    pub fn edge(&self, from: NodeId, to: NodeId) -> Option<&Edge> {
        self.graph.edge_weight(from, to)
    }

    /// Arcs leaving `id`, with the node they lead to.
    pub fn outgoing(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &Edge)> {
        self.graph
            .edges_directed(id, Direction::Outgoing)
            .map(|(_, to, edge)| (to, edge))
    }

    pub fn from_records(records: Vec<NodeRecord>) -> Result<Self, NetworkError> {
        let mut network = RoadNetwork::new();

        for record in &records {
            let position = checked_point(record.lat, record.lon).map_err(|source| {
                NetworkError::InvalidNode {
                    node_id: record.node_id,
                    source,
                }
            })?;

            network.add_node(record.node_id, position);
        }

        let mut skipped = 0usize;
        for record in &records {
            for (neighbor, edge) in &record.neighbors {
                if !network.positions.contains_key(neighbor) {
                    debug!(
                        "Edge {} -> {} references an unknown node, skipping",
                        record.node_id, neighbor
                    );
                    skipped += 1;
                    continue;
                }

                if !network.add_edge(record.node_id, *neighbor, Edge::from(edge)) {
                    skipped += 1;
                }
            }
        }

        info!(
            "Loaded road network with {} nodes and {} edges ({} skipped)",
            network.size(),
            network.graph.edge_count(),
            skipped
        );

        Ok(network)
    }

    /// Shortest path between two nodes of the network.
    pub fn shortest_path(&self, start: NodeId, target: NodeId) -> RouteResult {
        RoutingOverlay::new(self).shortest_path(start, target)
    }

    /// Shortest path between two snapped positions.
    ///
    /// Each position becomes a temporary node wired onto its segment,
    /// unless it coincides with one of the segment's endpoints. The
    /// temporary nodes are discarded once the query completes.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, level = Level::DEBUG))]
    pub fn route_between(
        &self,
        from: &ClosestStreetResult,
        to: &ClosestStreetResult,
    ) -> Result<RouteResult, NetworkError> {
        let mut overlay = RoutingOverlay::new(self);

        let start = overlay.materialize(from)?;
        let target = overlay.materialize(to)?;

        Ok(overlay.shortest_path(start, target))
    }
}
