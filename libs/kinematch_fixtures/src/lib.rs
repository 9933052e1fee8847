//! Checked-in inputs for tests and benches.
//!
//! The network is a 570m primary road (`way 100`, nodes 1 to 5, running
//! east along latitude 50.0) with a residential spur (`way 200`) leaving
//! node 3 northwards and a service road (`way 300`) joining the spur to
//! node 8. The trace drives east along the primary road, one fix every
//! ten seconds, roughly four meters north of the carriageway.

use std::path::PathBuf;

pub const NETWORK: &str = "network.jsonl";
pub const GRID: &str = "grid.jsonl";
pub const TRACE: &str = "trace.jsonl";

/// Resolves the absolute path of a named fixture.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}
