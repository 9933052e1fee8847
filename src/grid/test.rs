use crate::grid::{CellId, GridBounds, GridError, StreetGrid};
use crate::primitives::{Endpoint, Segment, TimedPosition};
use crate::util::fixture;

use approx::assert_relative_eq;
use geo::Point;

fn bounds() -> GridBounds {
    GridBounds::new(9.995, 10.015, 49.995, 50.010, 0.005).expect("bounds are valid")
}

#[test_log::test]
fn cells_floor_towards_negative() {
    let bounds = bounds();

    assert_eq!(bounds.cell_of(Point::new(10.0005, 50.0)), CellId::new(1, 1));
    assert_eq!(bounds.cell_of(Point::new(10.0065, 50.00004)), CellId::new(1, 2));
    assert_eq!(bounds.cell_of(Point::new(9.994, 49.994)), CellId::new(-1, -1));
}

#[test_log::test]
fn neighbourhood_is_three_by_three() {
    let cells = CellId::new(0, 0).neighbourhood().collect::<Vec<_>>();

    assert_eq!(cells.len(), 9);
    assert!(cells.contains(&CellId::new(-1, -1)));
    assert!(cells.contains(&CellId::new(1, 1)));
}

#[test_log::test]
fn rejects_invalid_bounds() {
    assert!(matches!(
        GridBounds::new(10.0, 9.0, 49.0, 50.0, 0.01),
        Err(GridError::InvalidBounds)
    ));
    assert!(matches!(
        GridBounds::new(9.0, 10.0, 49.0, 50.0, 0.0),
        Err(GridError::InvalidCellSize(_))
    ));
}

#[test_log::test]
fn nearest_roads_are_ordered_and_distinct() {
    let grid = fixture::grid();
    let point = TimedPosition::new(50.00004, 10.0005, 1_700_000_000_000);

    let roads = grid.nearest_roads(&point, 2);
    let ways = roads.iter().map(|road| road.segment.way_id).collect::<Vec<_>>();
    assert_eq!(ways, vec![100, 200]);

    // Snapped onto the first block of the primary road, keeping its timestamp.
    let nearest = roads[0];
    assert_eq!(nearest.segment.start.node_id, 1);
    assert_eq!(nearest.position.timestamp, point.timestamp);
    assert_relative_eq!(nearest.position.lat(), 50.0, epsilon = 1e-9);
    assert_relative_eq!(nearest.position.lng(), 10.0005, epsilon = 1e-9);

    // The spur runs due north, so its foot shares the point's latitude.
    let spur = roads[1];
    assert_relative_eq!(spur.position.lat(), 50.00004, epsilon = 1e-9);
    assert_relative_eq!(spur.position.lng(), 10.004, epsilon = 1e-9);

    let all = grid.nearest_roads(&point, 10);
    let ways = all.iter().map(|road| road.segment.way_id).collect::<Vec<_>>();
    assert_eq!(ways, vec![100, 200, 300]);
}

#[test_log::test]
fn far_points_find_nothing() {
    let grid = fixture::grid();
    let point = TimedPosition::new(51.0, 11.0, 0);

    assert!(grid.nearest_roads(&point, 2).is_empty());
}

#[test_log::test]
fn zero_candidates_requested() {
    let grid = fixture::grid();
    let point = TimedPosition::new(50.00004, 10.0005, 0);

    assert!(grid.nearest_roads(&point, 0).is_empty());
}

#[test_log::test]
fn degenerate_segment_snaps_to_its_endpoint() {
    let mut grid = StreetGrid::new(bounds());
    let endpoint = Endpoint {
        node_id: 1,
        position: Point::new(10.0, 50.0),
    };

    grid.insert_segment(Segment {
        way_id: 7,
        start: endpoint,
        end: endpoint,
    });
    assert_eq!(grid.size(), 1);

    let roads = grid.nearest_roads(&TimedPosition::new(50.0001, 10.0001, 0), 1);
    assert_eq!(roads.len(), 1);
    assert_eq!(roads[0].position.position, endpoint.position);
}

#[test_log::test]
fn segments_span_every_cell_they_touch() {
    let mut grid = StreetGrid::new(bounds());

    grid.insert_segment(Segment {
        way_id: 1,
        start: Endpoint {
            node_id: 1,
            position: Point::new(10.004, 50.0),
        },
        end: Endpoint {
            node_id: 2,
            position: Point::new(10.008, 50.0),
        },
    });

    // The start lies in one cell, the midpoint and end in the next.
    assert_eq!(grid.size(), 2);
}
