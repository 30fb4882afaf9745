#![allow(clippy::float_cmp)]

use super::*;
use crate::event::TouchPhase;
use crate::fixture_test::*;
use crate::registry::{RecognizerId, Registry};

const EPSILON: f64 = 1e-9;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn setup() -> (Registry, RecognizerId) {
    let mut reg = Registry::new();
    let id = reg.register(TARGET, Pinch::new());
    (reg, id)
}

fn scale_of(reg: &Registry, id: RecognizerId) -> f64 {
    match reg.detail(id).unwrap() {
        GestureDetail::Scale(s) => s,
        other => panic!("expected scale, got {other:?}"),
    }
}

fn place_pair(reg: &mut Registry) {
    send(reg, &touches(TouchPhase::Start, &[(1, 0.0, 0.0), (2, 100.0, 0.0)], 0.0));
}

#[test]
fn spreading_past_threshold_begins_with_scale() {
    let (mut reg, id) = setup();
    place_pair(&mut reg);
    send(&mut reg, &touches(TouchPhase::Move, &[(2, 150.0, 0.0)], 10.0));
    assert_eq!(reg.state(id).unwrap(), GestureState::Began);
    assert!(approx(scale_of(&reg, id), 1.5));
}

#[test]
fn small_distance_change_stays_possible() {
    let (mut reg, id) = setup();
    place_pair(&mut reg);
    send(&mut reg, &touches(TouchPhase::Move, &[(2, 110.0, 0.0)], 10.0));
    assert_eq!(reg.state(id).unwrap(), GestureState::Possible);
    assert!(approx(scale_of(&reg, id), 1.0));
}

#[test]
fn pinch_in_reports_scale_below_one() {
    let (mut reg, id) = setup();
    let log = record(&mut reg, id);
    place_pair(&mut reg);
    send(&mut reg, &touches(TouchPhase::Move, &[(2, 50.0, 0.0)], 10.0));
    send(&mut reg, &touches(TouchPhase::Move, &[(2, 25.0, 0.0)], 20.0));
    assert_eq!(states(&log), vec![GestureState::Began, GestureState::Changed]);
    assert_eq!(log.borrow()[1].detail, GestureDetail::Scale(0.25));
}

#[test]
fn lifting_both_fingers_ends() {
    let (mut reg, id) = setup();
    let log = record(&mut reg, id);
    place_pair(&mut reg);
    send(&mut reg, &touches(TouchPhase::Move, &[(2, 150.0, 0.0)], 10.0));
    send(&mut reg, &touches(TouchPhase::End, &[(1, 0.0, 0.0), (2, 150.0, 0.0)], 20.0));
    assert_eq!(states(&log), vec![GestureState::Began, GestureState::Ended]);
    assert_eq!(reg.state(id).unwrap(), GestureState::Possible);
    assert!(approx(scale_of(&reg, id), 1.0));
}

#[test]
fn new_pair_carries_scale_offset() {
    let (mut reg, id) = setup();
    place_pair(&mut reg);
    send(&mut reg, &touches(TouchPhase::Move, &[(2, 200.0, 0.0)], 10.0));
    assert!(approx(scale_of(&reg, id), 2.0));

    send(&mut reg, &touches(TouchPhase::End, &[(2, 200.0, 0.0)], 20.0));
    send(&mut reg, &touches(TouchPhase::Start, &[(3, 0.0, 50.0)], 30.0));
    assert!(approx(scale_of(&reg, id), 2.0));

    send(&mut reg, &touches(TouchPhase::Move, &[(3, 0.0, 100.0)], 40.0));
    assert_eq!(reg.state(id).unwrap(), GestureState::Changed);
    assert!(approx(scale_of(&reg, id), 4.0));
}

#[test]
fn lone_touch_moving_far_fails() {
    let (mut reg, id) = setup();
    send(&mut reg, &touches(TouchPhase::Start, &[(1, 0.0, 0.0)], 0.0));
    send(&mut reg, &touches(TouchPhase::Move, &[(1, 0.0, 10.0)], 10.0));
    assert_eq!(reg.state(id).unwrap(), GestureState::Possible);
    send(&mut reg, &touches(TouchPhase::Move, &[(1, 0.0, 40.0)], 20.0));
    assert_eq!(reg.state(id).unwrap(), GestureState::Failed);
}

#[test]
fn mouse_fails_pinch() {
    let (mut reg, id) = setup();
    send(&mut reg, &down(0.0, 0.0, Button::Primary, 0.0));
    assert_eq!(reg.state(id).unwrap(), GestureState::Failed);
}

#[test]
fn coincident_touches_never_divide_by_zero() {
    let (mut reg, id) = setup();
    send(&mut reg, &touches(TouchPhase::Start, &[(1, 5.0, 5.0), (2, 5.0, 5.0)], 0.0));
    send(&mut reg, &touches(TouchPhase::Move, &[(2, 80.0, 5.0)], 10.0));
    assert_eq!(reg.state(id).unwrap(), GestureState::Possible);
    assert!(scale_of(&reg, id).is_finite());
}
