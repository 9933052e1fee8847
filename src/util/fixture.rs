//! Loaders for the checked-in fixtures, shared by unit tests.

use crate::grid::StreetGrid;
use crate::graph::RoadNetwork;
use crate::primitives::TimedPosition;

use kinematch_fixtures::{GRID, NETWORK, TRACE, fixture_path};
use std::fs::File;
use std::io::BufReader;

fn open(name: &str) -> BufReader<File> {
    let file = File::open(fixture_path(name)).expect("fixture must exist");
    BufReader::new(file)
}

pub fn network() -> RoadNetwork {
    let records = codec::read_network(open(NETWORK)).expect("network fixture must decode");
    RoadNetwork::from_records(records).expect("network fixture must load")
}

pub fn grid() -> StreetGrid {
    let file = codec::read_grid(open(GRID)).expect("grid fixture must decode");
    StreetGrid::from_records(file).expect("grid fixture must load")
}

pub fn trace() -> Vec<TimedPosition> {
    codec::read_trace(open(TRACE))
        .expect("trace fixture must decode")
        .into_iter()
        .map(|record| TimedPosition::new(record.lat, record.lon, record.timestamp))
        .collect()
}
