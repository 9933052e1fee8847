//! Local planar projection used for point-to-segment snapping.
//!
//! Positions are mapped onto a flat metric plane tangent to a single
//! reference point: `x` is the longitude offset scaled by the cosine of
//! the reference latitude, and `y` the latitude offset. Every position of
//! a query shares that one scale factor, so the plane does not shear
//! segments. This is accurate for the short distances involved in
//! snapping a GPS fix onto a nearby road.

use crate::EQUATORIAL_RADIUS;
use geo::{Coord, Point, coord};

/// Projection into planar meters around `origin`.
#[derive(Debug, Clone, Copy)]
pub struct LocalPlanar {
    origin: Point,
    cos_lat: f64,
}

/// Wraps a longitude difference into `[-180, 180]`.
fn wrap_degrees(delta: f64) -> f64 {
    (delta + 180.0).rem_euclid(360.0) - 180.0
}

impl LocalPlanar {
    pub fn new(origin: Point) -> Self {
        LocalPlanar {
            origin,
            cos_lat: origin.y().to_radians().cos(),
        }
    }

    pub fn project(&self, point: Point) -> Coord {
        let d_lng = wrap_degrees(point.x() - self.origin.x()).to_radians();
        let d_lat = (point.y() - self.origin.y()).to_radians();

        coord! {
            x: EQUATORIAL_RADIUS * d_lng * self.cos_lat,
            y: EQUATORIAL_RADIUS * d_lat,
        }
    }

    pub fn unproject(&self, value: Coord) -> Point {
        let d_lat = (value.y / EQUATORIAL_RADIUS).to_degrees();
        let d_lng = (value.x / (EQUATORIAL_RADIUS * self.cos_lat)).to_degrees();

        Point::new(
            wrap_degrees(self.origin.x() + d_lng),
            self.origin.y() + d_lat,
        )
    }
}

/// Finds the closest point to `point` upon the segment `start -> end`.
///
/// The segment is projected around `point` itself. The projection
/// parameter is clamped to `[0, 1]`, so the result never leaves the
/// segment. A zero-length segment yields its start.
pub fn closest_point_on_segment(point: Point, start: Point, end: Point) -> Point {
    let plane = LocalPlanar::new(point);

    let a = plane.project(start);
    let b = plane.project(end);

    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length_sq = dx * dx + dy * dy;

    if length_sq == 0.0 {
        return start;
    }

    // The query point is the origin of the plane.
    let t = ((-a.x) * dx + (-a.y) * dy) / length_sq;
    let t = t.clamp(0.0, 1.0);

    if t == 0.0 {
        return start;
    }

    if t == 1.0 {
        return end;
    }

    plane.unproject(coord! { x: a.x + t * dx, y: a.y + t * dy })
}
