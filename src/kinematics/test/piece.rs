use crate::kinematics::{Bisection, Motion, Piece};

use approx::assert_relative_eq;

#[test_log::test]
fn motion_carries_signed_acceleration() {
    assert_eq!(Motion::from_acceleration(3.0), Motion::Accelerating(3.0));
    assert_eq!(Motion::from_acceleration(-3.0), Motion::Decelerating(3.0));
    assert_eq!(Motion::from_acceleration(0.0), Motion::Constant);

    assert_eq!(Motion::Decelerating(2.0).acceleration(), -2.0);
}

#[test_log::test]
fn departing_piece_reaches_its_end_speed() {
    let piece = Piece::departing(0.0, 100.0, 0.0, Motion::Accelerating(5.0)).unwrap();

    assert_relative_eq!(piece.end_speed, 1000f64.sqrt(), epsilon = 1e-9);
    assert_relative_eq!(piece.speed_at(40.0).unwrap(), 20.0, epsilon = 1e-9);
    assert_relative_eq!(piece.traversal_time().unwrap(), 1000f64.sqrt() / 5.0, epsilon = 1e-9);
}

#[test_log::test]
fn braking_past_standstill_has_no_speed() {
    assert!(Piece::departing(0.0, 100.0, 10.0, Motion::Decelerating(5.0)).is_none());

    // Exactly reaching standstill is noise-tolerant.
    let stop = Piece::departing(0.0, 10.0, 10.0, Motion::Decelerating(5.0)).unwrap();
    assert_eq!(stop.end_speed, 0.0);
}

#[test_log::test]
fn standstill_is_never_traversed() {
    assert!(Piece::constant(0.0, 10.0, 0.0).traversal_time().unwrap().is_infinite());
    assert_eq!(Piece::constant(5.0, 5.0, 0.0).traversal_time(), Some(0.0));
    assert_eq!(Piece::constant(0.0, 10.0, 5.0).traversal_time(), Some(2.0));
}

#[test_log::test]
fn accelerating_meets_constant() {
    let accelerating = Piece::departing(0.0, 100.0, 0.0, Motion::Accelerating(5.0)).unwrap();
    let cruising = Piece::constant(0.0, 100.0, 20.0);

    assert_relative_eq!(accelerating.intersection(&cruising).unwrap(), 40.0, epsilon = 1e-9);
    assert_relative_eq!(cruising.intersection(&accelerating).unwrap(), 40.0, epsilon = 1e-9);
}

#[test_log::test]
fn accelerating_meets_braking() {
    let accelerating = Piece::departing(0.0, 100.0, 0.0, Motion::Accelerating(5.0)).unwrap();
    let braking = Piece::arriving(0.0, 100.0, 0.0, Motion::Decelerating(5.0)).unwrap();

    assert_relative_eq!(accelerating.intersection(&braking).unwrap(), 50.0, epsilon = 1e-9);
}

#[test_log::test]
fn crossings_outside_either_domain_are_ignored() {
    let accelerating = Piece::departing(0.0, 30.0, 0.0, Motion::Accelerating(5.0)).unwrap();
    let cruising = Piece::constant(0.0, 100.0, 20.0);
    assert!(accelerating.intersection(&cruising).is_none());

    let parallel = Piece::departing(0.0, 100.0, 5.0, Motion::Accelerating(5.0)).unwrap();
    let other = Piece::departing(0.0, 100.0, 0.0, Motion::Accelerating(5.0)).unwrap();
    assert!(parallel.intersection(&other).is_none());

    assert!(cruising.intersection(&Piece::constant(0.0, 100.0, 20.0)).is_none());
}

#[test_log::test]
fn truncation_recomputes_end_speed() {
    let piece = Piece::departing(0.0, 100.0, 0.0, Motion::Accelerating(5.0)).unwrap();
    let truncated = piece.truncated(40.0).unwrap();

    assert_eq!(truncated.end, 40.0);
    assert_relative_eq!(truncated.end_speed, 20.0, epsilon = 1e-9);
}

#[test_log::test]
fn bisection_finds_roots_either_way() {
    let search = Bisection::default();

    let rising = search.root(|x| Some(x * x - 2.0), 0.0, 2.0).unwrap();
    assert_relative_eq!(rising, 2f64.sqrt(), epsilon = 1e-6);

    let falling = search.root(|x| Some(2.0 - x * x), 0.0, 2.0).unwrap();
    assert_relative_eq!(falling, 2f64.sqrt(), epsilon = 1e-6);
}

#[test_log::test]
fn bisection_requires_a_sign_change() {
    let search = Bisection::default();

    assert!(search.root(|x| Some(x * x + 1.0), -1.0, 1.0).is_none());
    assert!(search.root(|_| None, 0.0, 1.0).is_none());
    assert!(search.root(|_| Some(f64::NAN), 0.0, 1.0).is_none());
    assert_eq!(search.root(|x| Some(x), 0.0, 1.0), Some(0.0));
}
