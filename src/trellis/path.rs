use crate::config::MatchConfig;
use crate::graph::{Edge, RouteResult};
use crate::kinematics::PathSegment;

/// Penalty, in meters, for every change of street class along a route.
pub const STREET_CHANGE_PENALTY: f64 = 100.0;

/// Length and street class changes of a route.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RouteAnalysis {
    pub length: f64,
    pub street_changes: usize,
}

impl RouteAnalysis {
    /// Lower is better.
    pub fn score(&self) -> f64 {
        self.length + STREET_CHANGE_PENALTY * self.street_changes as f64
    }
}

pub struct PathAnalyzer;

impl PathAnalyzer {
    pub fn analyze(route: &RouteResult) -> RouteAnalysis {
        Self::analyze_edges(&route.edges)
    }

    pub fn analyze_edges(edges: &[Edge]) -> RouteAnalysis {
        let length = edges.iter().map(|edge| edge.distance).sum();
        let street_changes = edges
            .windows(2)
            .filter(|pair| pair[0].street_type != pair[1].street_type)
            .count();

        RouteAnalysis {
            length,
            street_changes,
        }
    }

    pub fn score(route: &RouteResult) -> f64 {
        Self::analyze(route).score()
    }
}

/// Coalesces consecutive edges sharing an effective speed limit into
/// path segments.
pub fn path_segments(edges: &[Edge], config: &MatchConfig) -> Vec<PathSegment> {
    let mut segments: Vec<PathSegment> = Vec::new();

    for edge in edges {
        let limit = config.speed_limit(edge);

        match segments.last_mut() {
            Some(last) if last.speed_limit == limit => last.length += edge.distance,
            _ => segments.push(PathSegment::new(edge.distance, limit)),
        }
    }

    segments
}
