use crate::kinematics::SpeedInterval;
use crate::primitives::ClosestStreetResult;

use std::fmt::{Display, Formatter};

/// Handle of a [`CandidateInterval`] within its [`IntervalArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CandidateIntervalId(u32);

impl CandidateIntervalId {
    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl Display for CandidateIntervalId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One speed hypothesis at one road candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateInterval {
    pub interval: SpeedInterval,
    /// The hypothesis this one was derived from. Only the first trace point has none.
    pub predecessor: Option<CandidateIntervalId>,
    pub candidate: ClosestStreetResult,
    /// Score of the route from the predecessor's candidate to this one.
    pub link_score: f64,
    /// Sum of the link scores along the whole chain (lower is better).
    pub score: f64,
}

impl CandidateInterval {
    /// A chain's first hypothesis.
    pub fn root(interval: SpeedInterval, candidate: ClosestStreetResult) -> Self {
        CandidateInterval {
            interval,
            predecessor: None,
            candidate,
            link_score: 0.0,
            score: 0.0,
        }
    }

    /// A hypothesis reached from `predecessor` by a route scoring `link_score`.
    pub fn successor(
        interval: SpeedInterval,
        predecessor: (CandidateIntervalId, &CandidateInterval),
        candidate: ClosestStreetResult,
        link_score: f64,
    ) -> Self {
        let (id, previous) = predecessor;

        CandidateInterval {
            interval,
            predecessor: Some(id),
            candidate,
            link_score,
            score: previous.score + link_score,
        }
    }
}

/// Owner of every interval created during a matching run. Intervals
/// refer to their predecessors by handle, and are never removed.
#[derive(Debug, Clone, Default)]
pub struct IntervalArena {
    intervals: Vec<CandidateInterval>,
}

impl IntervalArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn push(&mut self, interval: CandidateInterval) -> CandidateIntervalId {
        let id = CandidateIntervalId(self.intervals.len() as u32);
        self.intervals.push(interval);
        id
    }

    #[inline]
    pub fn get(&self, id: CandidateIntervalId) -> Option<&CandidateInterval> {
        self.intervals.get(id.index())
    }

    /// Walks from `id` back to the root of its chain, newest first.
    pub fn chain(&self, id: CandidateIntervalId) -> impl Iterator<Item = (CandidateIntervalId, &CandidateInterval)> {
        std::iter::successors(
            self.get(id).map(|interval| (id, interval)),
            |(_, interval)| {
                let predecessor = interval.predecessor?;
                self.get(predecessor).map(|previous| (predecessor, previous))
            },
        )
    }
}
