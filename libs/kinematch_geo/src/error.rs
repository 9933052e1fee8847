use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    #[error("latitude {0} is outside of [-90, 90]")]
    InvalidLatitude(f64),

    #[error("longitude {0} is outside of [-180, 180]")]
    InvalidLongitude(f64),

    #[error("coordinate is not a finite number")]
    NonFinite,
}
