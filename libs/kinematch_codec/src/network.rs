//! Road network records, one node per line.
//!
//! ```text
//! {"node_id": 1, "lat": 50.0, "lon": 10.0, "neighbors": {"2": {"distance": 142.9, "street_type": "primary", "maxspeed": "50", "way_id": 100}}}
//! ```

use crate::error::CodecError;
use crate::lines::decode_lines;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::BufRead;

pub const UNKNOWN_MAXSPEED: &str = "Unknown";

fn unknown_maxspeed() -> String {
    UNKNOWN_MAXSPEED.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub distance: f64,
    pub street_type: String,
    #[serde(default = "unknown_maxspeed")]
    pub maxspeed: String,
    pub way_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub node_id: i64,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub neighbors: BTreeMap<i64, EdgeRecord>,
}

/// Reads every node of a JSON Lines road network.
pub fn read_network<R: BufRead>(reader: R) -> Result<Vec<NodeRecord>, CodecError> {
    let nodes: Vec<NodeRecord> = decode_lines(reader)?;
    log::info!("Decoded {} network nodes", nodes.len());
    Ok(nodes)
}
