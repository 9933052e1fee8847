use crate::primitives::WayId;
use codec::EdgeRecord;
use std::sync::Arc;

/// Metadata of a directed arc between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Length of the arc in meters.
    pub distance: f64,
    pub street_type: Arc<str>,
    /// Raw `maxspeed` tag, parsed when the edge is costed.
    pub max_speed: Arc<str>,
    pub way_id: WayId,
}

impl Edge {
    pub fn new(distance: f64, street_type: &str, max_speed: &str, way_id: WayId) -> Self {
        Edge {
            distance,
            street_type: Arc::from(street_type),
            max_speed: Arc::from(max_speed),
            way_id,
        }
    }

    /// The same street, spanning a different distance.
    pub fn with_distance(&self, distance: f64) -> Self {
        Edge {
            distance,
            ..self.clone()
        }
    }
}

impl From<&EdgeRecord> for Edge {
    fn from(value: &EdgeRecord) -> Self {
        Edge::new(
            value.distance,
            &value.street_type,
            &value.maxspeed,
            value.way_id,
        )
    }
}
