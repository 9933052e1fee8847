//! The bounded-width lattice of speed hypotheses over a trace.
//!
//! Each trace point becomes a [`DataPoint`] holding up to `c` road
//! candidates, and each candidate up to `K` [`CandidateInterval`]s. An
//! interval remembers the one it was derived from, so that the path
//! leading to any surviving hypothesis can be recovered afterwards.

#[doc(hidden)]
pub mod arena;
#[doc(hidden)]
pub mod candidate;
#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod lattice;
#[doc(hidden)]
pub mod layer;
#[doc(hidden)]
pub mod matcher;
pub mod path;


#[doc(inline)]
pub use arena::*;
#[doc(inline)]
pub use candidate::*;
#[doc(inline)]
pub use error::StepFailure;
#[doc(inline)]
pub use lattice::*;
#[doc(inline)]
pub use layer::DataPoint;
#[doc(inline)]
pub use matcher::Trellis;
#[doc(inline)]
pub use path::{PathAnalyzer, RouteAnalysis};
