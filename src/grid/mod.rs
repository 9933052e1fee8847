//! Uniform-grid spatial index over road segments.

#[doc(hidden)]
pub mod cell;
#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod index;

#[cfg(test)]
mod test;

#[doc(inline)]
pub use cell::*;
#[doc(inline)]
pub use error::GridError;
#[doc(inline)]
pub use index::StreetGrid;
