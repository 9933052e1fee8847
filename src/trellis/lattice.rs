use crate::trellis::{CandidateInterval, CandidateIntervalId, DataPoint, IntervalArena, StepFailure};

/// The trellis built over a trace: one [`DataPoint`] per trace point
/// reached, and the arena owning every interval they refer to.
#[derive(Debug, Clone, Default)]
pub struct Lattice {
    pub(crate) layers: Vec<DataPoint>,
    pub(crate) arena: IntervalArena,
}

impl Lattice {
    pub fn layers(&self) -> &[DataPoint] {
        &self.layers
    }

    pub fn arena(&self) -> &IntervalArena {
        &self.arena
    }

    #[inline]
    pub fn interval(&self, id: CandidateIntervalId) -> Option<&CandidateInterval> {
        self.arena.get(id)
    }

    /// Intervals of the last trace point reached whose range is finite
    /// and in order.
    pub fn terminal_intervals(&self) -> Vec<CandidateIntervalId> {
        self.layers
            .last()
            .map(|layer| {
                layer
                    .intervals()
                    .filter(|id| {
                        self.interval(*id)
                            .is_some_and(|interval| interval.interval.is_well_formed())
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Result of running the trellis over a trace.
#[derive(Debug, Clone)]
pub enum MatchOutcome {
    /// Every trace point was reached.
    Matched(Lattice),
    /// Matching stopped early. The lattice holds the trace points
    /// reached before the failure.
    Failed { failure: StepFailure, lattice: Lattice },
}

impl MatchOutcome {
    pub fn is_matched(&self) -> bool {
        matches!(self, MatchOutcome::Matched(_))
    }

    pub fn failure(&self) -> Option<StepFailure> {
        match self {
            MatchOutcome::Matched(_) => None,
            MatchOutcome::Failed { failure, .. } => Some(*failure),
        }
    }

    pub fn lattice(&self) -> &Lattice {
        match self {
            MatchOutcome::Matched(lattice) | MatchOutcome::Failed { lattice, .. } => lattice,
        }
    }

    /// The complete lattice, or the failure which prevented it.
    pub fn into_result(self) -> Result<Lattice, StepFailure> {
        match self {
            MatchOutcome::Matched(lattice) => Ok(lattice),
            MatchOutcome::Failed { failure, .. } => Err(failure),
        }
    }
}
