use crate::primitives::{ClosestStreetResult, NodeId};

use codec::CodecError;
use codec::gpx::write_gpx;
use geo::Point;
use serde::Serialize;
use std::io::Write;

/// A matched path through the road network.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedPath {
    /// The candidate chosen for every trace point, in trace order.
    pub candidates: Vec<ClosestStreetResult>,
    /// Every node traversed, temporary nodes included.
    pub path: Vec<NodeId>,
    /// Position of every node in `path`.
    pub positions: Vec<Point>,
    /// Accumulated score of the path (lower is better).
    pub score: f64,
}

/// Brief description of a [`MatchedPath`], for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct MatchSummary {
    pub score: f64,
    pub trace_points: usize,
    pub nodes: usize,
    pub ways: Vec<i64>,
}

impl MatchedPath {
    /// Name under which the path is exported, ranking it by its score.
    pub fn file_name(&self, rank: usize) -> String {
        format!("score_{:.2}_{rank}.gpx", self.score)
    }

    /// Writes the path as a GPX track.
    pub fn write_gpx<W: Write>(&self, writer: W, name: &str) -> Result<(), CodecError> {
        write_gpx(
            writer,
            name,
            self.positions.iter().map(|position| (position.y(), position.x())),
        )
    }

    pub fn summary(&self) -> MatchSummary {
        let mut ways = self
            .candidates
            .iter()
            .map(|candidate| candidate.segment.way_id)
            .collect::<Vec<_>>();
        ways.dedup();

        MatchSummary {
            score: self.score,
            trace_points: self.candidates.len(),
            nodes: self.path.len(),
            ways,
        }
    }
}
