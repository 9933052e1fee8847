use crate::graph::NetworkError;
use crate::grid::GridError;
use crate::impl_err;
use crate::kinematics::ProfileError;
use crate::reconstruct::ReconstructError;
use crate::trellis::StepFailure;

use codec::CodecError;
use kinematch_geo::GeoError;
use thiserror::Error;

/// Every way a matching run can fail, from loading its inputs to
/// writing its results.
#[derive(Error, Debug)]
pub enum Error {
    #[error("codec: {0}")]
    Codec(CodecError),

    #[error("geometry: {0}")]
    Geo(GeoError),

    #[error("grid: {0}")]
    Grid(GridError),

    #[error("network: {0}")]
    Network(NetworkError),

    #[error("profile: {0}")]
    Profile(ProfileError),

    #[error("matching stopped: {0}")]
    Match(StepFailure),

    #[error("reconstruction: {0}")]
    Reconstruct(ReconstructError),

    #[error("io: {0}")]
    IO(std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl_err!(CodecError, Codec);
impl_err!(GeoError, Geo);
impl_err!(GridError, Grid);
impl_err!(NetworkError, Network);
impl_err!(ProfileError, Profile);
impl_err!(StepFailure, Match);
impl_err!(ReconstructError, Reconstruct);
impl_err!(std::io::Error, IO);
