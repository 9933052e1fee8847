use crate::primitives::ClosestStreetResult;
use crate::trellis::{CandidateInterval, CandidateIntervalId, IntervalArena};

use log::trace;
use smallvec::SmallVec;

/// What became of an interval offered to a [`CandidateData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Appended(CandidateIntervalId),
    /// Took the slot of an interval it dominates.
    Replaced(CandidateIntervalId),
    /// Took the slot of the worst-scored interval of a full list.
    Evicted(CandidateIntervalId),
    Rejected,
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        !matches!(self, Admission::Rejected)
    }
}

/// All surviving speed hypotheses for one road candidate at one trace point.
#[derive(Debug, Clone)]
pub struct CandidateData {
    pub candidate: ClosestStreetResult,
    intervals: SmallVec<[CandidateIntervalId; 8]>,
    capacity: usize,
}

impl CandidateData {
    pub fn new(candidate: ClosestStreetResult, capacity: usize) -> Self {
        CandidateData {
            candidate,
            intervals: SmallVec::new(),
            capacity,
        }
    }

    pub fn intervals(&self) -> &[CandidateIntervalId] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Offers an interval to the candidate, storing it in the arena only
    /// when it is admitted.
    ///
    /// The list holds at most `capacity` intervals, compared against the
    /// stored ones in order:
    ///
    /// 1. An interval strictly inside a stored one adds nothing and is rejected.
    /// 2. A stored interval with the same range and predecessor makes it a duplicate.
    /// 3. A stored interval strictly inside it, from the same predecessor, is replaced.
    /// 4. Otherwise, if a stored interval shares its predecessor, the lower score stays.
    /// 5. Overlapping ranges from different predecessors are kept side by side.
    ///
    /// Having passed every stored interval, it is appended when there is
    /// room, or evicts the worst-scored interval if it scores strictly better.
    pub fn offer(&mut self, arena: &mut IntervalArena, offered: CandidateInterval) -> Admission {
        let mut worst: Option<(usize, f64)> = None;

        for slot in 0..self.intervals.len() {
            let id = self.intervals[slot];
            let Some(existing) = arena.get(id).copied() else {
                continue;
            };

            if worst.is_none_or(|(_, score)| existing.score > score) {
                worst = Some((slot, existing.score));
            }

            let same_predecessor = existing.predecessor == offered.predecessor;

            if existing.interval.strictly_contains(&offered.interval) {
                trace!("Rejecting {:?}, contained by {id}", offered.interval);
                return Admission::Rejected;
            }

            if existing.interval == offered.interval && same_predecessor {
                return Admission::Rejected;
            }

            if offered.interval.strictly_contains(&existing.interval) {
                if same_predecessor {
                    return self.replace(arena, slot, offered);
                }

                continue;
            }

            if same_predecessor {
                if offered.score < existing.score {
                    return self.replace(arena, slot, offered);
                }

                return Admission::Rejected;
            }
        }

        if self.intervals.len() < self.capacity {
            let id = arena.push(offered);
            self.intervals.push(id);
            return Admission::Appended(id);
        }

        match worst {
            Some((slot, score)) if offered.score < score => {
                let id = arena.push(offered);
                self.intervals[slot] = id;
                Admission::Evicted(id)
            }
            _ => Admission::Rejected,
        }
    }

    fn replace(&mut self, arena: &mut IntervalArena, slot: usize, offered: CandidateInterval) -> Admission {
        let id = arena.push(offered);
        self.intervals[slot] = id;
        Admission::Replaced(id)
    }
}
