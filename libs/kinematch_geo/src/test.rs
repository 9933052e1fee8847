use crate::{GeoError, LocalPlanar, checked_point, closest_point_on_segment, coincident, haversine};

use approx::assert_relative_eq;
use geo::Point;

#[test]
fn projection_round_trips() {
    let plane = LocalPlanar::new(Point::new(13.4, 52.52));
    let point = Point::new(13.404954, 52.520008);
    let back = plane.unproject(plane.project(point));

    assert_relative_eq!(back.x(), point.x(), epsilon = 1e-9);
    assert_relative_eq!(back.y(), point.y(), epsilon = 1e-9);
}

#[test]
fn projection_is_centred_on_its_origin() {
    let origin = Point::new(116.3, 39.9);
    let plane = LocalPlanar::new(origin);

    let projected = plane.project(origin);
    assert_eq!((projected.x, projected.y), (0.0, 0.0));

    // A meridian stays vertical however far from Greenwich it lies.
    let north = plane.project(Point::new(116.3, 39.901));
    assert_relative_eq!(north.x, 0.0, epsilon = 1e-9);
    assert!(north.y > 0.0);
}

#[test]
fn projection_wraps_the_antimeridian() {
    let plane = LocalPlanar::new(Point::new(179.9999, 0.0));
    let across = plane.project(Point::new(-179.9999, 0.0));

    assert!(across.x > 0.0 && across.x < 50.0, "got {across:?}");
}

#[test]
fn snaps_onto_segment_interior() {
    let start = Point::new(10.0, 50.0);
    let end = Point::new(10.01, 50.0);
    let query = Point::new(10.005, 50.001);

    let snapped = closest_point_on_segment(query, start, end);

    assert_relative_eq!(snapped.y(), 50.0, epsilon = 1e-9);
    assert_relative_eq!(snapped.x(), 10.005, epsilon = 1e-9);
}

#[test]
fn snaps_onto_meridian_far_from_greenwich() {
    let start = Point::new(116.3, 39.900);
    let end = Point::new(116.3, 39.901);

    // Twenty meters due east of the segment's midpoint.
    let latitude: f64 = 39.9005;
    let east = (20.0 / (6371008.8 * latitude.to_radians().cos())).to_degrees();
    let query = Point::new(116.3 + east, latitude);

    let snapped = closest_point_on_segment(query, start, end);
    let foot = Point::new(116.3, latitude);

    assert!(haversine(snapped, foot) < 0.01, "snapped {snapped:?} is off the foot");
    assert_relative_eq!(haversine(query, snapped), 20.0, max_relative = 1e-3);
}

#[test]
fn clamps_beyond_segment_end() {
    let start = Point::new(10.0, 50.0);
    let end = Point::new(10.01, 50.0);

    let before = closest_point_on_segment(Point::new(9.99, 50.0005), start, end);
    let after = closest_point_on_segment(Point::new(10.02, 49.9995), start, end);

    assert!(coincident(before, start), "expected start, got {before:?}");
    assert!(coincident(after, end), "expected end, got {after:?}");
}

#[test]
fn degenerate_segment_returns_endpoint() {
    let start = Point::new(10.0, 50.0);
    let snapped = closest_point_on_segment(Point::new(10.1, 50.1), start, start);

    assert_eq!(snapped, start);
}

#[test]
fn haversine_is_roughly_metric() {
    // One thousandth of a degree of latitude is ~111m
    let distance = haversine(Point::new(0.0, 0.0), Point::new(0.0, 0.001));
    assert_relative_eq!(distance, 111.19, max_relative = 0.01);
}

#[test]
fn rejects_invalid_coordinates() {
    assert_eq!(checked_point(91.0, 0.0), Err(GeoError::InvalidLatitude(91.0)));
    assert_eq!(checked_point(0.0, -181.0), Err(GeoError::InvalidLongitude(-181.0)));
    assert_eq!(checked_point(f64::NAN, 0.0), Err(GeoError::NonFinite));

    let point = checked_point(52.5, 13.4).expect("valid coordinate");
    assert_eq!((point.x(), point.y()), (13.4, 52.5));
}
