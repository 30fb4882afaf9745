use super::*;
use crate::event::TouchPhase;
use crate::fixture_test::*;
use crate::registry::{RecognizerId, Registry};

const EPSILON: f64 = 1e-9;

fn setup() -> (Registry, RecognizerId) {
    let mut reg = Registry::new();
    let id = reg.register(TARGET, Rotation::new());
    (reg, id)
}

fn rotation_of(reg: &Registry, id: RecognizerId) -> f64 {
    match reg.detail(id).unwrap() {
        GestureDetail::Rotation(r) => r,
        other => panic!("expected rotation, got {other:?}"),
    }
}

#[test]
fn quarter_turn_begins() {
    let (mut reg, id) = setup();
    send(&mut reg, &touches(TouchPhase::Start, &[(1, 0.0, 0.0), (2, 100.0, 0.0)], 0.0));
    send(&mut reg, &touches(TouchPhase::Move, &[(2, 0.0, 100.0)], 10.0));
    assert_eq!(reg.state(id).unwrap(), GestureState::Began);
    assert!((rotation_of(&reg, id) - 90.0).abs() < EPSILON);
}

#[test]
fn small_turn_stays_possible() {
    let (mut reg, id) = setup();
    send(&mut reg, &touches(TouchPhase::Start, &[(1, 0.0, 0.0), (2, 100.0, 0.0)], 0.0));
    // atan(20/100) is about 11.3 degrees
    send(&mut reg, &touches(TouchPhase::Move, &[(2, 100.0, 20.0)], 10.0));
    assert_eq!(reg.state(id).unwrap(), GestureState::Possible);
}

#[test]
fn pure_spread_has_no_rotation() {
    let (mut reg, id) = setup();
    send(&mut reg, &touches(TouchPhase::Start, &[(1, 0.0, 0.0), (2, 100.0, 0.0)], 0.0));
    send(&mut reg, &touches(TouchPhase::Move, &[(2, 150.0, 0.0)], 10.0));
    assert_eq!(reg.state(id).unwrap(), GestureState::Possible);
    assert!(rotation_of(&reg, id).abs() < EPSILON);
}

#[test]
fn rotation_is_normalized_across_the_seam() {
    let (mut reg, id) = setup();
    // segment points left (180 degrees), then rotates to -150 degrees
    send(&mut reg, &touches(TouchPhase::Start, &[(1, 100.0, 0.0), (2, 0.0, 0.0)], 0.0));
    let angle = (-150.0_f64).to_radians();
    send(&mut reg, &touches(TouchPhase::Move, &[(2, 100.0 + 100.0 * angle.cos(), 100.0 * angle.sin())], 10.0));
    assert_eq!(reg.state(id).unwrap(), GestureState::Began);
    assert!((rotation_of(&reg, id) - 30.0).abs() < 1e-6);
}

#[test]
fn new_pair_carries_rotation_offset() {
    let (mut reg, id) = setup();
    let log = record(&mut reg, id);
    send(&mut reg, &touches(TouchPhase::Start, &[(1, 0.0, 0.0), (2, 100.0, 0.0)], 0.0));
    send(&mut reg, &touches(TouchPhase::Move, &[(2, 0.0, 100.0)], 10.0));
    send(&mut reg, &touches(TouchPhase::End, &[(2, 0.0, 100.0)], 20.0));
    send(&mut reg, &touches(TouchPhase::Start, &[(3, 100.0, 0.0)], 30.0));
    assert!((rotation_of(&reg, id) - 90.0).abs() < EPSILON);
    send(&mut reg, &touches(TouchPhase::Move, &[(3, 0.0, 100.0)], 40.0));
    assert!((rotation_of(&reg, id) - 180.0).abs() < EPSILON);
    send(&mut reg, &touches(TouchPhase::End, &[(1, 0.0, 0.0), (3, 0.0, 100.0)], 50.0));
    assert_eq!(
        states(&log),
        vec![GestureState::Began, GestureState::Changed, GestureState::Ended]
    );
}

#[test]
fn mouse_fails_rotation() {
    let (mut reg, id) = setup();
    send(&mut reg, &down(0.0, 0.0, Button::Secondary, 0.0));
    assert_eq!(reg.state(id).unwrap(), GestureState::Failed);
}
