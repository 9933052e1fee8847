use crate::kinematics::Profile;
use crate::kinematics::piece::{DOMAIN_EPSILON, Motion, Piece, speed_after, speed_before};

use log::{debug, trace};

/// A run of road with a single effective speed limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSegment {
    /// Meters.
    pub length: f64,
    /// Meters per second.
    pub speed_limit: f64,
}

impl PathSegment {
    pub fn new(length: f64, speed_limit: f64) -> Self {
        PathSegment {
            length,
            speed_limit,
        }
    }
}

impl Profile {
    /// Builds the maximum-speed curve `U(x)` over a sequence of path
    /// segments, for a vehicle starting anywhere within
    /// `[v_start_min, v_start_max]` and accelerating or braking at no more
    /// than `acceleration`.
    ///
    /// The vehicle accelerates towards each limit as soon as it can. When
    /// a limit drops below the current speed, the curve is revised
    /// backwards: braking must begin early enough to meet the lower limit
    /// where it starts. If even braking from the very start cannot respect
    /// the limit without starting slower than `v_start_min`, no profile
    /// exists and `None` is returned.
    pub fn build(
        segments: &[PathSegment],
        v_start_min: f64,
        v_start_max: f64,
        acceleration: f64,
    ) -> Option<Profile> {
        let a = acceleration.abs();
        if !(a > 0.0) || !a.is_finite() {
            debug!("Cannot build a profile with acceleration {acceleration}");
            return None;
        }

        let mut profile = Profile::default();

        let mut speed = v_start_max;
        let mut x = 0.0;

        for segment in segments {
            if !(segment.length > DOMAIN_EPSILON) {
                debug!("Skipping empty path segment {segment:?}");
                continue;
            }

            let limit = segment.speed_limit.max(0.0);
            let end = x + segment.length;

            if speed == limit {
                profile.push(Piece::constant(x, end, limit));
            } else if speed < limit {
                let to_limit = (limit * limit - speed * speed) / (2.0 * a);

                if to_limit <= segment.length {
                    profile.push(Piece {
                        start: x,
                        end: x + to_limit,
                        initial_speed: speed,
                        end_speed: limit,
                        motion: Motion::Accelerating(a),
                    });
                    profile.push(Piece::constant(x + to_limit, end, limit));
                    speed = limit;
                } else {
                    let piece = Piece::departing(x, end, speed, Motion::Accelerating(a))?;
                    speed = piece.end_speed;
                    profile.push(piece);
                }
            } else {
                Self::brake_towards(&mut profile, x, end, limit, v_start_min, a)?;
                speed = limit;
            }

            x = end;
        }

        trace!("Built profile over {x}m with {} pieces", profile.pieces().len());
        Some(profile)
    }

    /// Revises the curve so that it reaches `limit` at `brake_end`, then
    /// holds `limit` until `segment_end`.
    fn brake_towards(
        profile: &mut Profile,
        brake_end: f64,
        segment_end: f64,
        limit: f64,
        v_start_min: f64,
        a: f64,
    ) -> Option<()> {
        // Walking backwards, the braking curve v^2 = limit^2 + 2a(brake_end - x)
        // rises until it meets the previous curve.
        while let Some(piece) = profile.pop() {
            let slope = piece.motion.acceleration();
            if (slope + a).abs() < f64::EPSILON {
                // Braking curves are parallel, this one lies entirely above.
                continue;
            }

            let crossing = (limit * limit - piece.initial_speed.powi(2) + 2.0 * slope * piece.start
                + 2.0 * a * brake_end)
                / (2.0 * (slope + a));

            if !piece.contains(crossing) {
                continue;
            }

            let crossing = crossing.clamp(piece.start, piece.end);
            let crossing_speed = speed_after(piece.initial_speed, slope, crossing - piece.start)?;

            if crossing > piece.start + DOMAIN_EPSILON {
                profile.push(Piece {
                    end: crossing,
                    end_speed: crossing_speed,
                    ..piece
                });
            }

            profile.push(Piece {
                start: crossing,
                end: brake_end,
                initial_speed: crossing_speed,
                end_speed: limit,
                motion: Motion::Decelerating(a),
            });
            profile.push(Piece::constant(brake_end, segment_end, limit));
            return Some(());
        }

        // The braking curve clears every earlier piece, the vehicle must
        // already be braking at the start of the route.
        let Some(start_speed) = speed_before(limit, -a, brake_end) else {
            debug!("Braking towards {limit}m/s at {brake_end}m has no real start speed");
            return None;
        };

        if start_speed < v_start_min {
            debug!(
                "Braking towards {limit}m/s at {brake_end}m requires starting at {start_speed}m/s, below {v_start_min}m/s"
            );
            return None;
        }

        profile.push(Piece {
            start: 0.0,
            end: brake_end,
            initial_speed: start_speed,
            end_speed: limit,
            motion: Motion::Decelerating(a),
        });
        profile.push(Piece::constant(brake_end, segment_end, limit));

        Some(())
    }
}
