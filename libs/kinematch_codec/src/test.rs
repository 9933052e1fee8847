use crate::gpx::write_gpx;
use crate::network::UNKNOWN_MAXSPEED;
use crate::{CodecError, SpeedValue, read_grid, read_network, read_trace};

use approx::assert_relative_eq;
use chrono::{DateTime, Utc};
use kinematch_fixtures::{GRID, NETWORK, TRACE, fixture_path};
use std::fs::File;
use std::io::{BufReader, Cursor};

fn open(name: &str) -> BufReader<File> {
    let file = File::open(fixture_path(name)).expect("fixture must exist");
    BufReader::new(file)
}

#[test_log::test]
fn reads_fixture_network() {
    let nodes = read_network(open(NETWORK)).expect("network must decode");
    assert_eq!(nodes.len(), 8);

    let junction = nodes.iter().find(|n| n.node_id == 3).expect("node 3");
    assert_eq!(junction.neighbors.len(), 3);

    let spur = &junction.neighbors[&6];
    assert_eq!(spur.street_type, "residential");
    assert_eq!(spur.way_id, 200);
    assert_eq!(spur.maxspeed, UNKNOWN_MAXSPEED, "missing maxspeed defaults");

    let main = &junction.neighbors[&4];
    assert_eq!(main.maxspeed, "50");
    assert_relative_eq!(main.distance, 142.949, epsilon = 1e-3);
}

#[test_log::test]
fn skips_comments_and_blank_lines() {
    let input = "# header\n\n{\"node_id\": 9, \"lat\": 1.0, \"lon\": 2.0, \"neighbors\": {}}\n   \n";
    let nodes = read_network(Cursor::new(input)).expect("must decode");

    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].node_id, 9);
}

#[test_log::test]
fn reports_line_of_malformed_record() {
    let input = "# header\n{\"node_id\": 1, \"lat\": 1.0, \"lon\": 2.0}\n{\"node_id\": \"two\"}\n";
    let err = read_network(Cursor::new(input)).expect_err("must fail");

    assert!(matches!(err, CodecError::Json { line: 3, .. }), "got {err:?}");
}

#[test_log::test]
fn reads_fixture_grid() {
    let grid = read_grid(open(GRID)).expect("grid must decode");

    assert_relative_eq!(grid.bounds.cell_size, 0.005);
    assert_relative_eq!(grid.bounds.min_lat, 49.995);
    assert!(!grid.cells.is_empty());

    let segments = grid.cells.iter().map(|c| c.segments.len()).sum::<usize>();
    assert!(segments >= 7, "every segment must be placed, got {segments}");
}

#[test_log::test]
fn grid_requires_bounds() {
    let err = read_grid(Cursor::new("preamble only\n")).expect_err("must fail");
    assert!(matches!(err, CodecError::MissingBounds));

    let zero = "{\"min_lon\": 0, \"max_lon\": 1, \"min_lat\": 0, \"max_lat\": 1, \"cell_size\": 0}\n";
    let err = read_grid(Cursor::new(zero)).expect_err("must fail");
    assert!(matches!(err, CodecError::Malformed { line: 1, .. }));
}

#[test_log::test]
fn reads_fixture_trace() {
    let trace = read_trace(open(TRACE)).expect("trace must decode");

    assert_eq!(trace.len(), 4);
    assert_eq!(trace[1].timestamp - trace[0].timestamp, 10_000);
}

#[test_log::test]
fn rejects_decreasing_timestamps() {
    let input = "{\"lat\": 1.0, \"lon\": 1.0, \"timestamp\": 10}\n{\"lat\": 1.0, \"lon\": 1.0, \"timestamp\": 5}\n";
    let err = read_trace(Cursor::new(input)).expect_err("must fail");

    assert!(matches!(err, CodecError::OutOfOrder { record: 1 }));
}

#[test]
fn parses_maxspeed_values() {
    let parse = |raw: &str| raw.parse::<SpeedValue>().expect("infallible");

    assert_eq!(parse("50"), SpeedValue::Kmh(50.0));
    assert_eq!(parse("30 mph"), SpeedValue::Mph(30.0));
    assert_eq!(parse("12 knots"), SpeedValue::Knots(12.0));
    assert_eq!(parse("none"), SpeedValue::None);
    assert_eq!(parse("signals"), SpeedValue::Variable);
    assert_eq!(parse("walk"), SpeedValue::Walk);
    assert_eq!(parse("Unknown"), SpeedValue::Unknown);
    assert_eq!(parse("DE:urban"), SpeedValue::Unknown);

    assert_relative_eq!(parse("30 mph").in_kmh().unwrap_or_default(), 48.28032);
    assert_relative_eq!(parse("10 knots").in_kmh().unwrap_or_default(), 18.52);
    assert!(parse("none").in_kmh().is_none());
}

#[test]
fn writes_gpx_track() {
    let mut buffer = Vec::new();
    let positions = vec![(50.0, 10.0), (50.001, 10.002)];

    write_gpx(&mut buffer, "score <12> & co", positions).expect("must write");
    let document = gpx::read(Cursor::new(buffer)).expect("must read back");

    assert_eq!(document.version, gpx::GpxVersion::Gpx11);
    assert_eq!(document.tracks.len(), 1);

    let track = &document.tracks[0];
    assert_eq!(track.name.as_deref(), Some("score <12> & co"));

    let points = &track.segments[0].points;
    assert_eq!(points.len(), 2);
    assert_relative_eq!(points[1].point().y(), 50.001);
    assert_relative_eq!(points[1].point().x(), 10.002);

    let times = points
        .iter()
        .map(|point| {
            let iso = point.time.as_ref().expect("timestamped").format().expect("formats");
            DateTime::parse_from_rfc3339(&iso).expect("rfc3339").with_timezone(&Utc).timestamp()
        })
        .collect::<Vec<_>>();
    assert_eq!(times, vec![0, 1]);
}
