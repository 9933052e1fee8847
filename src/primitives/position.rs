use geo::Point;

/// A GPS fix, timestamped in milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedPosition {
    pub position: Point,
    pub timestamp: i64,
}

impl TimedPosition {
    pub fn new(lat: f64, lng: f64, timestamp: i64) -> Self {
        TimedPosition {
            position: Point::new(lng, lat),
            timestamp,
        }
    }

    #[inline]
    pub fn lat(&self) -> f64 {
        self.position.y()
    }

    #[inline]
    pub fn lng(&self) -> f64 {
        self.position.x()
    }

    /// Seconds elapsed between this fix and a later one.
    pub fn seconds_until(&self, later: &TimedPosition) -> f64 {
        (later.timestamp - self.timestamp) as f64 / 1000.0
    }

    /// The same instant at a different location.
    pub fn moved_to(&self, position: Point) -> Self {
        TimedPosition { position, ..*self }
    }
}
