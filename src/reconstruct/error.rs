use crate::graph::NetworkError;
use crate::trellis::CandidateIntervalId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconstructError {
    #[error("interval {0} is not part of the lattice")]
    UnknownInterval(CandidateIntervalId),

    #[error("interval {0} has no valid speed range")]
    MalformedInterval(CandidateIntervalId),

    #[error("could not re-route a matched hop: {0}")]
    Network(#[from] NetworkError),
}
