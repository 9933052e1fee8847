//! Recovery of matched paths from a finished lattice.

#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod path;
#[doc(hidden)]
pub mod reconstructor;


#[doc(inline)]
pub use error::ReconstructError;
#[doc(inline)]
pub use path::{MatchSummary, MatchedPath};
#[doc(inline)]
pub use reconstructor::{BASELINE_CANDIDATES, PathReconstructor};
