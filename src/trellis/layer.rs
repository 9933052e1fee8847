use crate::primitives::{ClosestStreetResult, TimedPosition};
use crate::trellis::{CandidateData, CandidateIntervalId};

/// One trace point of the trellis, and the road candidates considered for it.
#[derive(Debug, Clone)]
pub struct DataPoint {
    pub position: TimedPosition,
    candidates: Vec<CandidateData>,
    width: usize,
}

impl DataPoint {
    /// A trace point holding at most `width` candidates, each tracking
    /// at most `capacity` intervals.
    pub fn new(position: TimedPosition, candidates: &[ClosestStreetResult], width: usize, capacity: usize) -> Self {
        DataPoint {
            position,
            candidates: candidates
                .iter()
                .take(width)
                .map(|candidate| CandidateData::new(*candidate, capacity))
                .collect(),
            width,
        }
    }

    pub fn candidates(&self) -> &[CandidateData] {
        &self.candidates
    }

    pub fn candidate(&self, slot: usize) -> Option<&CandidateData> {
        self.candidates.get(slot)
    }

    pub(crate) fn candidate_mut(&mut self, slot: usize) -> Option<&mut CandidateData> {
        self.candidates.get_mut(slot)
    }

    /// The slot holding `candidate`, if it is one of this point's candidates.
    pub fn slot_of(&self, candidate: &ClosestStreetResult) -> Option<usize> {
        self.candidates.iter().position(|data| data.candidate == *candidate)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of intervals held across every candidate.
    pub fn survivors(&self) -> usize {
        self.candidates.iter().map(CandidateData::len).sum()
    }

    pub fn intervals(&self) -> impl Iterator<Item = CandidateIntervalId> + '_ {
        self.candidates
            .iter()
            .flat_map(|data| data.intervals().iter().copied())
    }
}
