use crate::config::MatchConfig;
use crate::kinematics::SpeedInterval;
use crate::primitives::TimedPosition;
use crate::trellis::{MatchOutcome, StepFailure, Trellis};
use crate::util::fixture;

use approx::assert_relative_eq;
use itertools::Itertools;

const BLOCK: f64 = 142.949;

#[test_log::test]
fn matches_the_fixture_trace() {
    let (network, grid) = (fixture::network(), fixture::grid());
    let trace = fixture::trace();

    let trellis = Trellis::new(&network, &grid, MatchConfig::default());
    let lattice = trellis.run(&trace).into_result().expect("trace must match");

    assert_eq!(lattice.layers().len(), trace.len());

    let ways = lattice
        .terminal_intervals()
        .iter()
        .filter_map(|id| lattice.interval(*id))
        .map(|interval| interval.candidate.segment.way_id)
        .unique()
        .sorted()
        .collect::<Vec<_>>();

    assert_eq!(ways, vec![100, 200]);
}

#[test_log::test]
fn follows_the_primary_road() {
    let (network, grid) = (fixture::network(), fixture::grid());
    let config = MatchConfig::default().with_candidates(1);

    let trellis = Trellis::new(&network, &grid, config);
    let lattice = trellis.run(&fixture::trace()).into_result().expect("trace must match");

    let terminals = lattice.terminal_intervals();
    assert_eq!(terminals.len(), 1);

    let terminal = lattice.interval(terminals[0]).unwrap();

    // Three blocks, without changing street class.
    assert_relative_eq!(terminal.score, 3.0 * BLOCK, max_relative = 1e-3);
    assert!(terminal.interval.is_well_formed());
    assert!(terminal.interval.high <= 50.0 / 3.6 + 1e-6);
}

#[test_log::test]
fn every_layer_respects_its_bounds() {
    let (network, grid) = (fixture::network(), fixture::grid());
    let config = MatchConfig::default().with_tracked_intervals(1);

    let trellis = Trellis::new(&network, &grid, config);
    let outcome = trellis.run(&fixture::trace());

    for layer in outcome.lattice().layers() {
        assert!(layer.candidates().len() <= 2);
        for data in layer.candidates() {
            assert!(data.len() <= 1);
        }
    }
}

#[test_log::test]
fn standing_still_carries_intervals_over() {
    let (network, grid) = (fixture::network(), fixture::grid());
    let here = fixture::trace()[0];
    let later = TimedPosition { timestamp: here.timestamp + 5_000, ..here };

    let trellis = Trellis::new(&network, &grid, MatchConfig::default());
    let lattice = trellis.run(&[here, later]).into_result().expect("trace must match");

    let [first, second] = lattice.layers() else {
        panic!("expected two layers");
    };

    for data in second.candidates() {
        assert_eq!(data.len(), 1);

        let interval = lattice.interval(data.intervals()[0]).unwrap();
        let predecessor = lattice.interval(interval.predecessor.unwrap()).unwrap();

        assert_eq!(interval.interval, SpeedInterval::new(0.0, 5.0));
        assert_eq!(interval.link_score, 0.0);
        assert_eq!(interval.score, 0.0);
        assert_eq!(predecessor.candidate, data.candidate);
        assert!(first.slot_of(&predecessor.candidate).is_some());
    }
}

#[test_log::test]
fn stops_where_no_road_is_near() {
    let (network, grid) = (fixture::network(), fixture::grid());
    let mut trace = fixture::trace();
    trace[2] = TimedPosition::new(51.0, 11.0, trace[2].timestamp);

    let trellis = Trellis::new(&network, &grid, MatchConfig::default());
    let outcome = trellis.run(&trace);

    assert_eq!(outcome.failure(), Some(StepFailure::NoCandidates { index: 2 }));
    assert_eq!(outcome.lattice().layers().len(), 2);
}

#[test_log::test]
fn stops_where_no_road_is_near_the_start() {
    let (network, grid) = (fixture::network(), fixture::grid());
    let trace = [TimedPosition::new(51.0, 11.0, 0)];

    let outcome = Trellis::new(&network, &grid, MatchConfig::default()).run(&trace);

    assert_eq!(outcome.failure(), Some(StepFailure::NoCandidates { index: 0 }));
    assert!(outcome.lattice().layers().is_empty());
}

#[test_log::test]
fn stops_when_the_vehicle_cannot_keep_up() {
    let (network, grid) = (fixture::network(), fixture::grid());
    let trace = fixture::trace();

    // A block of the primary road in no time at all.
    let rushed = [trace[0], TimedPosition { timestamp: trace[0].timestamp, ..trace[1] }];

    let config = MatchConfig::default().with_candidates(1);
    let outcome = Trellis::new(&network, &grid, config).run(&rushed);

    let MatchOutcome::Failed { failure, lattice } = outcome else {
        panic!("match must fail");
    };

    assert_eq!(failure, StepFailure::NoSurvivors { index: 0 });
    assert_eq!(failure.index(), Some(0));
    assert_eq!(lattice.layers().len(), 1);
}

#[test_log::test]
fn empty_trace_is_a_failure() {
    let (network, grid) = (fixture::network(), fixture::grid());
    let outcome = Trellis::new(&network, &grid, MatchConfig::default()).run(&[]);

    assert!(!outcome.is_matched());
    assert_eq!(outcome.failure(), Some(StepFailure::EmptyTrace));
    assert_eq!(StepFailure::EmptyTrace.index(), None);
}
