use log::warn;

/// Radicands smaller than this in magnitude are floating-point noise and read as zero.
pub const RADICAND_EPSILON: f64 = 1e-6;

/// Slack when testing whether a position lies within a piece.
pub const DOMAIN_EPSILON: f64 = 1e-9;

/// How speed changes across a piece. Accelerations are magnitudes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    Constant,
    Accelerating(f64),
    Decelerating(f64),
}

impl Motion {
    /// Builds the motion for a signed acceleration.
    pub fn from_acceleration(acceleration: f64) -> Self {
        if acceleration > 0.0 {
            Motion::Accelerating(acceleration)
        } else if acceleration < 0.0 {
            Motion::Decelerating(-acceleration)
        } else {
            Motion::Constant
        }
    }

    /// Signed acceleration: positive while accelerating, negative while decelerating.
    #[inline]
    pub fn acceleration(&self) -> f64 {
        match self {
            Motion::Constant => 0.0,
            Motion::Accelerating(a) => *a,
            Motion::Decelerating(a) => -*a,
        }
    }
}

/// Takes the root of a kinematic radicand, reading near-zero noise as zero.
/// A clearly negative radicand has no real root and yields `None`.
pub fn root(radicand: f64) -> Option<f64> {
    if radicand.abs() < RADICAND_EPSILON {
        Some(0.0)
    } else if radicand < 0.0 {
        warn!("Negative radicand {radicand} in kinematic equation");
        None
    } else {
        Some(radicand.sqrt())
    }
}

/// Speed after travelling `dx` from speed `v0` under signed acceleration `a`.
#[inline]
pub fn speed_after(v0: f64, a: f64, dx: f64) -> Option<f64> {
    root(v0 * v0 + 2.0 * a * dx)
}

/// Speed `dx` before reaching speed `v1` under signed acceleration `a`.
#[inline]
pub fn speed_before(v1: f64, a: f64, dx: f64) -> Option<f64> {
    root(v1 * v1 - 2.0 * a * dx)
}

/// One piece of a speed-over-distance curve, spanning `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Piece {
    pub start: f64,
    pub end: f64,
    pub initial_speed: f64,
    pub end_speed: f64,
    pub motion: Motion,
}

impl Piece {
    pub fn constant(start: f64, end: f64, speed: f64) -> Self {
        Piece {
            start,
            end,
            initial_speed: speed,
            end_speed: speed,
            motion: Motion::Constant,
        }
    }

    /// A piece leaving `start` at `initial_speed`, its end speed following from the motion.
    pub fn departing(start: f64, end: f64, initial_speed: f64, motion: Motion) -> Option<Self> {
        let end_speed = speed_after(initial_speed, motion.acceleration(), end - start)?;

        Some(Piece {
            start,
            end,
            initial_speed,
            end_speed,
            motion,
        })
    }

    /// A piece reaching `end` at `end_speed`, its initial speed following from the motion.
    pub fn arriving(start: f64, end: f64, end_speed: f64, motion: Motion) -> Option<Self> {
        let initial_speed = speed_before(end_speed, motion.acceleration(), end - start)?;

        Some(Piece {
            start,
            end,
            initial_speed,
            end_speed,
            motion,
        })
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        x >= self.start - DOMAIN_EPSILON && x <= self.end + DOMAIN_EPSILON
    }

    /// Speed at `x`, evaluated forward from the start of the piece.
    pub fn speed_at(&self, x: f64) -> Option<f64> {
        match self.motion {
            Motion::Constant => Some(self.end_speed),
            motion => {
                let x = x.clamp(self.start, self.end);
                speed_after(self.initial_speed, motion.acceleration(), x - self.start)
            }
        }
    }

    /// Time needed to traverse the piece, the integral of `1 / v(x)`.
    ///
    /// A piece held at standstill is never traversed, so its time is
    /// infinite. Empty pieces take no time at all.
    pub fn traversal_time(&self) -> Option<f64> {
        let length = self.length();
        if length <= 0.0 {
            return Some(0.0);
        }

        match self.motion {
            Motion::Constant if self.initial_speed > 0.0 => Some(length / self.initial_speed),
            Motion::Constant => Some(f64::INFINITY),
            motion => {
                let a = motion.acceleration();
                let v = speed_after(self.initial_speed, a, length)?;
                Some((v - self.initial_speed) / a)
            }
        }
    }

    /// The part of this piece before `x`, with its end speed recomputed.
    pub fn truncated(&self, x: f64) -> Option<Self> {
        let end = x.clamp(self.start, self.end);
        Some(Piece {
            end,
            end_speed: self.speed_at(end)?,
            ..*self
        })
    }

    /// Where the speed curves of two pieces cross, if they do so within
    /// both of their domains.
    ///
    /// Every piece follows `v(x)^2 = v0^2 + 2a(x - start)`, so two curves
    /// meet where these squared speeds agree. Parallel curves (equal
    /// acceleration) either never meet or coincide, and neither is
    /// reported as a crossing.
    pub fn intersection(&self, other: &Piece) -> Option<f64> {
        let x = match (self.motion, other.motion) {
            (Motion::Constant, Motion::Constant) => return None,
            (Motion::Constant, changing) => {
                crossing_speed(self.end_speed, other, changing.acceleration())
            }
            (changing, Motion::Constant) => {
                crossing_speed(other.end_speed, self, changing.acceleration())
            }
            (a, b) => {
                let (a1, a2) = (a.acceleration(), b.acceleration());
                if a1 == a2 {
                    return None;
                }

                (other.initial_speed.powi(2) - self.initial_speed.powi(2) + 2.0 * a1 * self.start
                    - 2.0 * a2 * other.start)
                    / (2.0 * (a1 - a2))
            }
        };

        let low = self.start.max(other.start);
        let high = self.end.min(other.end);

        if !x.is_finite() || x < low - DOMAIN_EPSILON || x > high + DOMAIN_EPSILON {
            return None;
        }

        Some(x.clamp(low, high.max(low)))
    }
}

/// Position at which `changing` (with signed acceleration `a`) attains `speed`.
fn crossing_speed(speed: f64, changing: &Piece, a: f64) -> f64 {
    changing.start + (speed * speed - changing.initial_speed.powi(2)) / (2.0 * a)
}
