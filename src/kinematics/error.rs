use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    #[error("position {x} lies outside of the profile [0, {length}]")]
    OutOfRange { x: f64, length: f64 },

    #[error("speed at {x} is not a real number")]
    NegativeRadicand { x: f64 },
}
