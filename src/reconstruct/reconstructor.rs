use crate::graph::{NetworkError, RoadNetwork};
use crate::grid::StreetGrid;
use crate::primitives::{ClosestStreetResult, NodeId, TimedPosition};
use crate::reconstruct::{MatchedPath, ReconstructError};
use crate::trellis::{CandidateIntervalId, Lattice, PathAnalyzer};

use geo::Point;
use itertools::Itertools;
use kinematch_geo::coincident;
use log::{debug, warn};
use rayon::prelude::*;
#[cfg(feature = "tracing")]
use tracing::Level;

/// Roads considered per trace point by [`PathReconstructor::nearest_snap`].
pub const BASELINE_CANDIDATES: usize = 10;

/// Node path through a sequence of candidates.
#[derive(Debug, Default)]
struct Stitched {
    path: Vec<NodeId>,
    positions: Vec<Point>,
    /// Scores of the routes taken, summed.
    score: f64,
}

/// Turns chains of candidates back into paths through the road network.
pub struct PathReconstructor<'a> {
    network: &'a RoadNetwork,
}

impl<'a> PathReconstructor<'a> {
    pub fn new(network: &'a RoadNetwork) -> Self {
        PathReconstructor { network }
    }

    /// Follows the predecessors of a terminal interval back to the first
    /// trace point, and routes between each consecutive pair of the
    /// candidates met along the way.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, lattice), level = Level::DEBUG))]
    pub fn reconstruct(
        &self,
        lattice: &Lattice,
        terminal: CandidateIntervalId,
    ) -> Result<MatchedPath, ReconstructError> {
        let interval = lattice
            .interval(terminal)
            .ok_or(ReconstructError::UnknownInterval(terminal))?;

        if !interval.interval.is_well_formed() {
            return Err(ReconstructError::MalformedInterval(terminal));
        }

        let mut chain = lattice.arena().chain(terminal).map(|(_, link)| link).collect::<Vec<_>>();
        chain.reverse();

        let score = chain.iter().map(|link| link.link_score).sum::<f64>();
        let candidates = chain.iter().map(|link| link.candidate).collect::<Vec<_>>();

        let stitched = self.stitch(&candidates)?;
        if (stitched.score - score).abs() > 1e-6 * score.max(1.0) {
            warn!(
                "Re-routed path of {terminal} scores {}, its hypothesis {score}",
                stitched.score
            );
        }

        Ok(MatchedPath {
            candidates,
            path: stitched.path,
            positions: stitched.positions,
            score,
        })
    }

    /// Reconstructs every valid terminal interval, best score first.
    pub fn reconstruct_all(&self, lattice: &Lattice) -> Result<Vec<MatchedPath>, ReconstructError> {
        let mut paths = lattice
            .terminal_intervals()
            .into_par_iter()
            .map(|terminal| self.reconstruct(lattice, terminal))
            .collect::<Result<Vec<_>, _>>()?;

        paths.sort_by(|a, b| a.score.total_cmp(&b.score));
        debug!("Reconstructed {} matched paths", paths.len());

        Ok(paths)
    }

    /// Matches a trace without any kinematic reasoning: each point is
    /// snapped onto its nearest road, and consecutive snaps are routed.
    ///
    /// Stops at the first trace point without a road nearby.
    pub fn nearest_snap(&self, grid: &StreetGrid, trace: &[TimedPosition]) -> Result<MatchedPath, ReconstructError> {
        let candidates = trace
            .iter()
            .enumerate()
            .map_while(|(index, point)| {
                let nearest = grid.nearest_roads(point, BASELINE_CANDIDATES).into_iter().next();
                if nearest.is_none() {
                    warn!("No road near trace point {index}, snapping stops");
                }

                nearest
            })
            .collect::<Vec<_>>();

        let stitched = self.stitch(&candidates)?;

        Ok(MatchedPath {
            candidates,
            path: stitched.path,
            positions: stitched.positions,
            score: stitched.score,
        })
    }

    /// Concatenates the routes between consecutive candidates. A node
    /// shared by two routes appears once.
    fn stitch(&self, candidates: &[ClosestStreetResult]) -> Result<Stitched, NetworkError> {
        let mut stitched = Stitched::default();

        for (index, (from, to)) in candidates.iter().tuple_windows().enumerate() {
            if coincident(from.position.position, to.position.position) {
                continue;
            }

            let route = self.network.route_between(from, to)?;
            if !route.is_reachable() {
                warn!("No route between trace points {index} and {}", index + 1);
                continue;
            }

            stitched.score += PathAnalyzer::score(&route);

            let joint = match (stitched.positions.last(), route.positions.first()) {
                (Some(last), Some(first)) => coincident(*last, *first),
                _ => false,
            };

            let skip = usize::from(joint);
            stitched.path.extend(route.path.iter().skip(skip));
            stitched.positions.extend(route.positions.iter().skip(skip));
        }

        Ok(stitched)
    }
}
