use crate::graph::network::ZERO_LENGTH;
use crate::graph::{Dijkstra, Edge, NetworkError, RoadNetwork, RouteResult};
use crate::primitives::{ClosestStreetResult, NodeId};

use geo::Point;
use itertools::Itertools;
use kinematch_geo::{coincident, haversine};
use log::{debug, warn};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Hands out identifiers for temporary nodes: -1, -2, -3, ...
#[derive(Debug)]
pub struct TemporaryIds {
    next: NodeId,
}

impl Default for TemporaryIds {
    fn default() -> Self {
        TemporaryIds { next: -1 }
    }
}

impl TemporaryIds {
    pub fn allocate(&mut self) -> NodeId {
        let id = self.next;
        self.next -= 1;
        id
    }
}

/// Where a temporary node sits: on the segment joining `low` and `high`
/// (ordered by node id), `offset` meters from `low`.
#[derive(Debug, Clone, Copy)]
struct Anchor {
    id: NodeId,
    low: NodeId,
    high: NodeId,
    offset: f64,
}

/// Per-query layer of temporary nodes on top of a shared [`RoadNetwork`].
///
/// Lookups consult the overlay first and fall back to the network, so the
/// network itself is never written to while routing.
pub struct RoutingOverlay<'a> {
    network: &'a RoadNetwork,
    ids: TemporaryIds,
    positions: FxHashMap<NodeId, Point>,
    extra: FxHashMap<NodeId, SmallVec<[(NodeId, Edge); 4]>>,
    anchors: Vec<Anchor>,
}

impl<'a> RoutingOverlay<'a> {
    pub fn new(network: &'a RoadNetwork) -> Self {
        RoutingOverlay {
            network,
            ids: TemporaryIds::default(),
            positions: FxHashMap::default(),
            extra: FxHashMap::default(),
            anchors: vec![],
        }
    }

    /// Number of temporary nodes held by this overlay.
    pub fn temporary_nodes(&self) -> usize {
        self.positions.len()
    }

    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.positions
            .get(&id)
            .copied()
            .or_else(|| self.network.position(id))
    }

    pub fn edge(&self, from: NodeId, to: NodeId) -> Option<&Edge> {
        self.extra
            .get(&from)
            .and_then(|arcs| arcs.iter().find(|(target, _)| *target == to))
            .map(|(_, edge)| edge)
            .or_else(|| self.network.edge(from, to))
    }

    fn successors(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &Edge)> {
        self.network.outgoing(id).chain(
            self.extra
                .get(&id)
                .into_iter()
                .flat_map(|arcs| arcs.iter().map(|(to, edge)| (*to, edge))),
        )
    }

    fn link(&mut self, from: NodeId, to: NodeId, edge: Edge) {
        if from == to || !(edge.distance > ZERO_LENGTH) {
            debug!("Skipping degenerate temporary edge {from} -> {to}");
            return;
        }

        self.extra.entry(from).or_default().push((to, edge));
    }

    /// Resolves the node standing for a snapped position.
    ///
    /// Reuses a segment endpoint (or an earlier temporary node on the same
    /// segment) when the position coincides with it, otherwise creates a
    /// temporary node wired to both endpoints in every direction the
    /// segment can be driven.
    pub fn materialize(&mut self, candidate: &ClosestStreetResult) -> Result<NodeId, NetworkError> {
        let snapped = candidate.position.position;
        let segment = candidate.segment;

        let (low, high) = if segment.start.node_id <= segment.end.node_id {
            (segment.start.node_id, segment.end.node_id)
        } else {
            (segment.end.node_id, segment.start.node_id)
        };

        let low_position = self
            .network
            .position(low)
            .ok_or(NetworkError::UnknownNode(low))?;
        let high_position = self
            .network
            .position(high)
            .ok_or(NetworkError::UnknownNode(high))?;

        if coincident(snapped, low_position) {
            return Ok(low);
        }

        if coincident(snapped, high_position) {
            return Ok(high);
        }

        if let Some(existing) = self.anchors.iter().find(|anchor| {
            anchor.low == low
                && anchor.high == high
                && self
                    .positions
                    .get(&anchor.id)
                    .is_some_and(|position| coincident(*position, snapped))
        }) {
            return Ok(existing.id);
        }

        let ascending = self.network.edge(low, high).cloned();
        let descending = self.network.edge(high, low).cloned();

        let template = ascending
            .clone()
            .or_else(|| descending.clone())
            .ok_or(NetworkError::MissingEdge {
                from: low,
                to: high,
            })?;

        let id = self.ids.allocate();
        self.positions.insert(id, snapped);

        let offset = haversine(low_position, snapped);
        let remainder = haversine(snapped, high_position);

        if ascending.is_some() {
            self.link(low, id, template.with_distance(offset));
            self.link(id, high, template.with_distance(remainder));
        }

        if descending.is_some() {
            self.link(high, id, template.with_distance(remainder));
            self.link(id, low, template.with_distance(offset));
        }

        // Other temporary nodes on this segment are joined directly,
        // rather than through one of the endpoints.
        let siblings = self
            .anchors
            .iter()
            .filter(|anchor| anchor.low == low && anchor.high == high)
            .copied()
            .collect_vec();

        for sibling in siblings {
            let (near, far) = if sibling.offset < offset {
                (sibling.id, id)
            } else {
                (id, sibling.id)
            };

            let hop = template.with_distance((offset - sibling.offset).abs());
            if ascending.is_some() {
                self.link(near, far, hop.clone());
            }

            if descending.is_some() {
                self.link(far, near, hop);
            }
        }

        self.anchors.push(Anchor {
            id,
            low,
            high,
            offset,
        });

        debug!("Materialized temporary node {id} on segment {low} <-> {high}");
        Ok(id)
    }

    /// Shortest path over the network and this overlay's temporary nodes.
    pub fn shortest_path(&self, start: NodeId, target: NodeId) -> RouteResult {
        let found = Dijkstra.shortest_path(start, target, |node| {
            let node = *node;
            self.successors(node)
                .filter(move |(to, edge)| {
                    if *to == node {
                        warn!("Ignoring self-loop on node {node}");
                        return false;
                    }

                    if !(edge.distance > ZERO_LENGTH) {
                        warn!("Ignoring zero-length edge {node} -> {to}");
                        return false;
                    }

                    true
                })
                .map(|(to, edge)| (to, edge.distance))
                .collect::<SmallVec<[(NodeId, f64); 8]>>()
        });

        let Some((distance, path)) = found else {
            debug!("No route between {start} and {target}");
            return RouteResult::unreachable();
        };

        let edges = path
            .iter()
            .tuple_windows()
            .filter_map(|(from, to)| self.edge(*from, *to).cloned())
            .collect();

        let positions = path
            .iter()
            .filter_map(|node| self.position(*node))
            .collect();

        RouteResult {
            distance,
            path,
            positions,
            edges,
        }
    }
}
