use crate::primitives::NodeId;
use kinematch_geo::GeoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("node {node_id} has an invalid position: {source}")]
    InvalidNode {
        node_id: NodeId,
        #[source]
        source: GeoError,
    },

    #[error("node {0} is not part of the network")]
    UnknownNode(NodeId),

    #[error("segment {from} <-> {to} has no edge in either direction")]
    MissingEdge { from: NodeId, to: NodeId },
}
