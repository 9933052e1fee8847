//! Feasible final-speed intervals.
//!
//! For a route with maximum-speed curve `U(x)` over `[0, L]`, a vehicle
//! entering with a speed in `[v_down, v_up]` and arriving exactly `dt`
//! seconds later can only be travelling within `[low, high]` at `L`.
//! Both bounds are certified by witness curves: concrete speed profiles
//! which stay below `U`, respect the acceleration bounds, and take `dt`.

use crate::kinematics::Profile;
use crate::kinematics::piece::{DOMAIN_EPSILON, Motion, Piece, RADICAND_EPSILON, speed_after};
use crate::kinematics::search::Bisection;

use log::{debug, trace};
#[cfg(feature = "tracing")]
use tracing::Level;

/// Witness travel times within this many seconds of `dt` are exact.
const TIME_TOLERANCE: f64 = 1e-6;

/// A closed range of speeds, in meters per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedInterval {
    pub low: f64,
    pub high: f64,
}

impl SpeedInterval {
    pub const fn new(low: f64, high: f64) -> Self {
        SpeedInterval { low, high }
    }

    /// Both bounds are finite, and in order.
    pub fn is_well_formed(&self) -> bool {
        self.low.is_finite() && self.high.is_finite() && self.low <= self.high
    }

    /// Whether `other` lies strictly inside this interval.
    pub fn strictly_contains(&self, other: &SpeedInterval) -> bool {
        self.low < other.low && other.high < self.high
    }

    /// Whether the two intervals share any speed.
    pub fn overlaps(&self, other: &SpeedInterval) -> bool {
        self.low < other.high && other.low < self.high
    }

    pub fn width(&self) -> f64 {
        self.high - self.low
    }
}

/// Fastest-braking curve `d` from the entry speed, and the latest
/// accelerating curve `e` arriving at `U(L)`.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    braking: Piece,
    arriving: Piece,
    length: f64,
}

impl Bounds {
    /// Brakes along `d` until `x`, then accelerates as hard as possible to `L`.
    fn witness(&self, x: f64) -> Option<Profile> {
        let braking = self.braking;
        let x = x.clamp(0.0, self.length);
        let turn_speed = speed_after(braking.initial_speed, braking.motion.acceleration(), x)?;

        let brake = Piece {
            start: 0.0,
            end: x,
            initial_speed: braking.initial_speed,
            end_speed: turn_speed,
            motion: braking.motion,
        };
        let accelerate = Piece::departing(x, self.length, turn_speed, self.arriving.motion)?;

        Some(Profile::from_pieces([brake, accelerate]))
    }

    fn witness_time(&self, x: f64) -> Option<f64> {
        self.witness(x)?.minimum_traversal_time()
    }

    fn braking_time(&self) -> Option<f64> {
        self.braking.traversal_time()
    }
}

impl Profile {
    /// Computes the speeds the vehicle may have at the end of the route
    /// after exactly `delta_t` seconds, having entered it with a speed in
    /// `[v_down, v_up]`.
    ///
    /// `a_down` is the braking bound (negative), `a_up` the acceleration
    /// bound (positive). Returns `None` when no motion within those bounds
    /// covers the route in `delta_t`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), level = Level::TRACE))]
    pub fn speed_interval(
        &self,
        v_down: f64,
        v_up: f64,
        a_down: f64,
        a_up: f64,
        delta_t: f64,
    ) -> Option<SpeedInterval> {
        if [v_down, v_up, a_down, a_up, delta_t].iter().any(|v| v.is_nan()) || self.is_empty() {
            return None;
        }

        let a_down = -a_down.abs();
        let a_up = a_up.abs();

        let fastest = self.minimum_traversal_time()?;
        if fastest > delta_t {
            trace!("Route needs at least {fastest}s, only {delta_t}s elapsed");
            return None;
        }

        let high = self.upper_final_speed(v_down, a_down, a_up, delta_t)?;
        let low = self.lower_final_speed(v_down, a_down, delta_t)?;

        Some(SpeedInterval::new(low, high))
    }

    /// The greatest speed at `L` reachable in exactly `delta_t`.
    fn upper_final_speed(&self, v_down: f64, a_down: f64, a_up: f64, delta_t: f64) -> Option<f64> {
        let length = self.length();
        let final_speed = self.end_speed()?;

        // Where braking from `v_down` reaches standstill, and where
        // accelerating from standstill must begin to arrive at `U(L)`.
        let brake_end = (v_down * v_down / (-2.0 * a_down)).min(length);
        let accelerate_start = (length - final_speed * final_speed / (2.0 * a_up)).max(0.0);

        let braking = Piece::departing(0.0, brake_end, v_down, Motion::from_acceleration(a_down))?;
        let arriving = Piece::arriving(
            accelerate_start,
            length,
            final_speed,
            Motion::from_acceleration(a_up),
        )?;

        let bounds = Bounds {
            braking,
            arriving,
            length,
        };

        let braking_stops = braking.end_speed == 0.0;
        let arriving_from_rest = arriving.initial_speed == 0.0;

        let crossing = braking.intersection(&arriving);
        match crossing {
            Some(x) => {
                // Slowest way of arriving at U(L): brake, then accelerate late.
                let slowest = bounds.witness_time(x)?;
                if slowest >= delta_t {
                    return Some(final_speed);
                }
            }
            None if braking_stops && arriving_from_rest => {
                // Stop, wait as long as needed, then accelerate to U(L).
                return Some(final_speed);
            }
            None => {
                let arriving_at_zero = if accelerate_start <= DOMAIN_EPSILON {
                    arriving.initial_speed
                } else {
                    0.0
                };

                if arriving_at_zero <= v_down {
                    debug!("Braking and arriving curves never meet, no upper bound");
                    return None;
                }

                if arriving.traversal_time()? >= delta_t {
                    return Some(final_speed);
                }
            }
        }

        // Arriving at U(L) is too fast. Arrive slower, by braking for longer.
        if !braking_stops && bounds.braking_time()? < delta_t {
            debug!("Braking over the whole route still arrives before {delta_t}s");
            return None;
        }

        self.slowed_final_speed(&bounds, brake_end, delta_t)
    }

    /// Finds the turning point `x'` whose brake-then-accelerate witness
    /// takes exactly `delta_t`, returning the witness's final speed.
    ///
    /// Witness time strictly increases with `x'`, so the root is bracketed
    /// by `[0, brake_end]` whenever one exists. Without one (or should the
    /// residual not settle within tolerance), the vehicle brakes fully and
    /// idles before accelerating away.
    fn slowed_final_speed(&self, bounds: &Bounds, brake_end: f64, delta_t: f64) -> Option<f64> {
        let residual = |x: f64| bounds.witness_time(x).map(|time| time - delta_t);
        let search = Bisection::new(TIME_TOLERANCE, 200);

        if let Some(turn) = search.root(residual, 0.0, brake_end) {
            let witness = bounds.witness(turn)?;
            let time = witness.minimum_traversal_time()?;

            if (time - delta_t).abs() < TIME_TOLERANCE {
                return witness.end_speed();
            }

            debug!("Turning point {turn} is {}s off target, braking fully", time - delta_t);
        } else {
            debug!("No turning point within [0, {brake_end}], braking fully");
        }

        bounds.witness(brake_end)?.end_speed()
    }

    /// The least speed at `L` reachable in exactly `delta_t`.
    fn lower_final_speed(&self, v_down: f64, a_down: f64, delta_t: f64) -> Option<f64> {
        let length = self.length();
        let final_speed = self.end_speed()?;

        // Braking from `v_down` over the whole route, the vehicle cannot end
        // slower than this. It comes to a stop if the route is long enough.
        let floor_squared = v_down * v_down + 2.0 * a_down * length;
        let floor = if floor_squared > RADICAND_EPSILON {
            floor_squared.sqrt()
        } else {
            0.0
        };

        let arrival_time = |speed: f64| self.braking_witness(speed, a_down)?.minimum_traversal_time();

        if floor == 0.0 && arrival_time(0.0)? <= delta_t {
            return Some(0.0);
        }

        let residual = |speed: f64| arrival_time(speed).map(|time| time - delta_t);
        match Bisection::default().root(residual, floor, final_speed) {
            Some(speed) => Some(speed),
            None if arrival_time(floor)? <= delta_t => Some(floor),
            None => {
                debug!("No arrival speed in [{floor}, {final_speed}] matches {delta_t}s");
                None
            }
        }
    }

    /// Fastest way of arriving at `L` with speed `arrival`: follow `U`,
    /// then brake as late as possible.
    fn braking_witness(&self, arrival: f64, a_down: f64) -> Option<Profile> {
        let length = self.length();
        let motion = Motion::from_acceleration(a_down);
        let braking = Piece::arriving(0.0, length, arrival, motion)?;

        match self.intersection_with(&braking) {
            Some(x) => {
                let mut witness = self.truncated_up_to(x);
                witness.push(Piece::arriving(x, length, arrival, motion)?);
                Some(witness)
            }
            None => Some(Profile::from_pieces([braking])),
        }
    }
}
