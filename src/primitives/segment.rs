use crate::primitives::{NodeId, TimedPosition, WayId};
use geo::Point;

/// One end of a road segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Endpoint {
    pub node_id: NodeId,
    pub position: Point,
}

/// The routable unit held by the spatial index: a straight line between
/// two network nodes, belonging to a single way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub way_id: WayId,
    pub start: Endpoint,
    pub end: Endpoint,
}

/// A trace point snapped onto its closest position upon a segment.
/// The snapped position keeps the timestamp of the original fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestStreetResult {
    pub position: TimedPosition,
    pub segment: Segment,
}
