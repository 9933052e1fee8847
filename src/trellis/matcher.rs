use crate::config::MatchConfig;
use crate::graph::RoadNetwork;
use crate::grid::StreetGrid;
use crate::kinematics::{Profile, SpeedInterval};
use crate::primitives::{ClosestStreetResult, TimedPosition};
use crate::trellis::path::{PathAnalyzer, path_segments};
use crate::trellis::{
    CandidateData, CandidateInterval, DataPoint, IntervalArena, Lattice, MatchOutcome, StepFailure,
};

use itertools::Itertools;
use kinematch_geo::coincident;
use log::{debug, info, trace, warn};
use measure_time::debug_time;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
#[cfg(feature = "tracing")]
use tracing::Level;

/// An interval produced for the candidate in slot `target` of the next trace point.
#[derive(Debug, Clone, Copy)]
struct Offer {
    target: usize,
    interval: CandidateInterval,
}

/// Matches traces against a road network, keeping only the speed
/// hypotheses a real vehicle could have followed.
///
/// ```rust,ignore
/// use kinematch::{MatchConfig, Trellis};
///
/// let trellis = Trellis::new(&network, &grid, MatchConfig::default());
/// let lattice = trellis.run(&trace).into_result()?;
/// ```
pub struct Trellis<'a> {
    network: &'a RoadNetwork,
    grid: &'a StreetGrid,
    config: MatchConfig,
}

impl<'a> Trellis<'a> {
    pub fn new(network: &'a RoadNetwork, grid: &'a StreetGrid, config: MatchConfig) -> Self {
        Trellis {
            network,
            grid,
            config,
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Builds the lattice over `trace`, one trace point at a time.
    ///
    /// Every candidate of the first point starts with the configured
    /// initial interval. Each step routes between every pair of
    /// candidates of consecutive points, and keeps the speed intervals
    /// reachable in the time between the two fixes. Matching stops at the
    /// first point without candidates, or once no interval survives.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, level = Level::INFO))]
    pub fn run(&self, trace: &[TimedPosition]) -> MatchOutcome {
        let mut lattice = Lattice::default();

        let Some(first) = trace.first() else {
            return MatchOutcome::Failed {
                failure: StepFailure::EmptyTrace,
                lattice,
            };
        };

        let candidates = self.grid.nearest_roads(first, self.config.candidates);
        if candidates.is_empty() {
            return self.fail(StepFailure::NoCandidates { index: 0 }, lattice);
        }

        let mut layer = self.layer(first, &candidates);
        for slot in 0..candidates.len() {
            if let Some(data) = layer.candidate_mut(slot) {
                let root = CandidateInterval::root(self.config.initial_interval, data.candidate);
                data.offer(&mut lattice.arena, root);
            }
        }
        lattice.layers.push(layer);

        for (index, pair) in trace.windows(2).enumerate() {
            let (current, next) = (&pair[0], &pair[1]);
            debug_time!("step {index}");

            let candidates = self.grid.nearest_roads(next, self.config.candidates);
            if candidates.is_empty() {
                return self.fail(StepFailure::NoCandidates { index: index + 1 }, lattice);
            }

            let delta_t = current.seconds_until(next) + self.config.time_buffer;
            let offers = match lattice.layers.last() {
                Some(source) => self.expand(source, &lattice.arena, &candidates, delta_t),
                None => vec![],
            };

            let mut layer = self.layer(next, &candidates);
            let offered = offers.len();
            for offer in offers {
                if let Some(data) = layer.candidate_mut(offer.target) {
                    data.offer(&mut lattice.arena, offer.interval);
                }
            }

            let survivors = layer.survivors();
            debug!(
                "Step {index} -> {}: {survivors} of {offered} intervals survive over {} candidates",
                index + 1,
                layer.candidates().len()
            );

            if survivors == 0 {
                return self.fail(StepFailure::NoSurvivors { index }, lattice);
            }

            lattice.layers.push(layer);
        }

        info!(
            "Matched {} trace points, {} intervals created",
            lattice.layers.len(),
            lattice.arena.len()
        );

        MatchOutcome::Matched(lattice)
    }

    fn layer(&self, position: &TimedPosition, candidates: &[ClosestStreetResult]) -> DataPoint {
        DataPoint::new(
            *position,
            candidates,
            self.config.candidates,
            self.config.tracked_intervals,
        )
    }

    fn fail(&self, failure: StepFailure, lattice: Lattice) -> MatchOutcome {
        warn!("Matching stopped: {failure}");
        MatchOutcome::Failed { failure, lattice }
    }

    /// Evaluates every candidate pair of a step in parallel. The offers
    /// are returned in a fixed order, source slot first, so that applying
    /// them one by one is deterministic.
    fn expand(
        &self,
        source: &DataPoint,
        arena: &IntervalArena,
        targets: &[ClosestStreetResult],
        delta_t: f64,
    ) -> Vec<Offer> {
        let pairs = source
            .candidates()
            .iter()
            .cartesian_product(targets.iter().take(source.width()).enumerate())
            .collect::<Vec<_>>();

        pairs
            .into_par_iter()
            .map(|(data, (slot, target))| self.transition(data, arena, slot, target, delta_t))
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect()
    }

    /// The intervals reachable at `target` from each interval of `data`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, level = Level::DEBUG))]
    fn transition(
        &self,
        data: &CandidateData,
        arena: &IntervalArena,
        slot: usize,
        target: &ClosestStreetResult,
        delta_t: f64,
    ) -> Vec<Offer> {
        let sources = data
            .intervals()
            .iter()
            .filter_map(|id| arena.get(*id).map(|interval| (*id, interval)))
            .collect::<Vec<_>>();

        if sources.is_empty() {
            return vec![];
        }

        // Standing still: every hypothesis carries over as it is.
        if coincident(data.candidate.position.position, target.position.position) {
            return sources
                .into_iter()
                .map(|(id, interval)| Offer {
                    target: slot,
                    interval: CandidateInterval::successor(interval.interval, (id, interval), *target, 0.0),
                })
                .collect();
        }

        let route = match self.network.route_between(&data.candidate, target) {
            Ok(route) => route,
            Err(err) => {
                warn!("Skipping candidate pair: {err}");
                return vec![];
            }
        };

        if !route.is_reachable() || route.edges.is_empty() {
            trace!("No route from way {} to way {}", data.candidate.segment.way_id, target.segment.way_id);
            return vec![];
        }

        let segments = path_segments(&route.edges, &self.config);
        let link_score = PathAnalyzer::score(&route);
        let acceleration = self.config.acceleration;

        sources
            .into_iter()
            .filter_map(|(id, interval)| {
                let SpeedInterval { low, high } = interval.interval;

                let Some(profile) = Profile::build(&segments, low, high, acceleration) else {
                    trace!("No speed profile from [{low}, {high}] along {}m", route.distance);
                    return None;
                };

                let reached = profile.speed_interval(low, high, -acceleration, acceleration, delta_t)?;

                Some(Offer {
                    target: slot,
                    interval: CandidateInterval::successor(reached, (id, interval), *target, link_score),
                })
            })
            .collect()
    }
}
