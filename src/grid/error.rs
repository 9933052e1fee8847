use crate::primitives::WayId;
use kinematch_geo::GeoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("grid bounds are empty or inverted")]
    InvalidBounds,

    #[error("cell size must be positive, got {0}")]
    InvalidCellSize(f64),

    #[error("segment of way {way_id} has an invalid endpoint: {source}")]
    InvalidEndpoint {
        way_id: WayId,
        #[source]
        source: GeoError,
    },
}
