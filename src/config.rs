//! Tunables of a matching run.

use crate::graph::Edge;
use crate::kinematics::SpeedInterval;

use codec::SpeedValue;
use log::debug;
use rustc_hash::FxHashMap;
use std::sync::Arc;

const KMH_PER_MPS: f64 = 3.6;

/// Default street class speeds, in km/h.
const STREET_SPEEDS: [(&str, f64); 11] = [
    ("motorway", 400.0),
    ("motorway_link", 150.0),
    ("trunk", 100.0),
    ("trunk_link", 100.0),
    ("primary", 100.0),
    ("primary_link", 100.0),
    ("secondary", 50.0),
    ("secondary_link", 50.0),
    ("tertiary", 50.0),
    ("unclassified", 50.0),
    ("residential", 30.0),
];

/// Configuration of the trellis.
///
/// ```rust
/// use kinematch::MatchConfig;
///
/// let config = MatchConfig::default()
///     .with_candidates(3)
///     .with_acceleration(3.5);
///
/// assert_eq!(config.candidates, 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    /// Road candidates considered per trace point (`c`).
    pub candidates: usize,
    /// Speed intervals tracked per candidate (`K`).
    pub tracked_intervals: usize,
    /// Speeds the vehicle may have at the first trace point (m/s).
    pub initial_interval: SpeedInterval,
    /// Bound on both acceleration and braking (m/s²).
    pub acceleration: f64,
    /// Multiplier applied to every speed limit.
    pub slack: f64,
    /// Seconds added to the time between fixes, absorbing timestamp rounding.
    pub time_buffer: f64,
    /// Fallback speeds per street class (km/h), used when an edge has no numeric limit.
    pub speed_table: FxHashMap<Arc<str>, f64>,
    /// Speed (km/h) of street classes missing from the table.
    pub unknown_street_speed: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            candidates: 2,
            tracked_intervals: 20,
            initial_interval: SpeedInterval::new(0.0, 5.0),
            acceleration: 5.0,
            slack: 1.0,
            time_buffer: 2.0,
            speed_table: STREET_SPEEDS
                .iter()
                .map(|(street, speed)| (Arc::from(*street), *speed))
                .collect(),
            unknown_street_speed: 30.0,
        }
    }
}

impl MatchConfig {
    pub fn with_candidates(self, candidates: usize) -> Self {
        MatchConfig { candidates, ..self }
    }

    pub fn with_tracked_intervals(self, tracked_intervals: usize) -> Self {
        MatchConfig {
            tracked_intervals,
            ..self
        }
    }

    pub fn with_initial_interval(self, low: f64, high: f64) -> Self {
        MatchConfig {
            initial_interval: SpeedInterval::new(low, high),
            ..self
        }
    }

    pub fn with_acceleration(self, acceleration: f64) -> Self {
        MatchConfig {
            acceleration,
            ..self
        }
    }

    pub fn with_slack(self, slack: f64) -> Self {
        MatchConfig { slack, ..self }
    }

    pub fn with_time_buffer(self, time_buffer: f64) -> Self {
        MatchConfig {
            time_buffer,
            ..self
        }
    }

    /// Replaces the street class table. Speeds are in km/h.
    pub fn with_speed_table<I, S>(self, table: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        MatchConfig {
            speed_table: table
                .into_iter()
                .map(|(street, speed)| (Arc::from(street.as_ref()), speed))
                .collect(),
            ..self
        }
    }

    pub fn with_unknown_street_speed(self, unknown_street_speed: f64) -> Self {
        MatchConfig {
            unknown_street_speed,
            ..self
        }
    }

    /// Speed of a street class, in km/h.
    pub fn street_speed(&self, street_type: &str) -> f64 {
        match self.speed_table.get(street_type) {
            Some(speed) => *speed,
            None => {
                debug!(
                    "No speed for street class {street_type}, assuming {}km/h",
                    self.unknown_street_speed
                );
                self.unknown_street_speed
            }
        }
    }

    /// Effective limit of an edge in m/s, slack applied.
    ///
    /// A numeric `maxspeed` tag wins; otherwise the street class decides.
    pub fn speed_limit(&self, edge: &Edge) -> f64 {
        let tagged = edge.max_speed.parse::<SpeedValue>().ok();
        let kmh = tagged
            .and_then(|value| value.in_kmh())
            .unwrap_or_else(|| self.street_speed(&edge.street_type));

        self.slack * kmh / KMH_PER_MPS
    }
}
