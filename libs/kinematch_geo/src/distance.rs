use crate::COINCIDENCE_EPSILON;
use crate::error::GeoError;

use geo::{Distance, Haversine, Point};

/// Great-circle distance between two lat/lng points, in meters.
#[inline]
pub fn haversine(a: Point, b: Point) -> f64 {
    Haversine.distance(a, b)
}

/// Whether two positions are within [`COINCIDENCE_EPSILON`] degrees of
/// one another on both axes.
#[inline]
pub fn coincident(a: Point, b: Point) -> bool {
    (a.y() - b.y()).abs() < COINCIDENCE_EPSILON && (a.x() - b.x()).abs() < COINCIDENCE_EPSILON
}

/// Builds a point from a latitude and longitude, rejecting values
/// which cannot describe a position on the globe.
pub fn checked_point(lat: f64, lng: f64) -> Result<Point, GeoError> {
    if !lat.is_finite() || !lng.is_finite() {
        return Err(GeoError::NonFinite);
    }

    if !(-90.0..=90.0).contains(&lat) {
        return Err(GeoError::InvalidLatitude(lat));
    }

    if !(-180.0..=180.0).contains(&lng) {
        return Err(GeoError::InvalidLongitude(lng));
    }

    Ok(Point::new(lng, lat))
}
