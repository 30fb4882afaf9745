use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::event::{Button, TouchPhase};
use crate::fixture_test::*;

/// Gesture with no hooks; transitions are driven by the test.
#[derive(Debug, Default)]
struct Idle;

impl Gesture for Idle {
    fn kind(&self) -> GestureKind {
        GestureKind::Drag
    }
}

fn registry_with(n: usize) -> (Registry, Vec<RecognizerId>) {
    let mut reg = Registry::new();
    let ids = (0..n).map(|_| reg.register(TARGET, Idle)).collect();
    (reg, ids)
}

/// Put every recognizer on the target into an interaction (button held).
fn press(reg: &mut Registry) {
    send(reg, &down(0.0, 0.0, Button::Primary, 0.0));
}

// =============================================================
// Membership and relations
// =============================================================

#[test]
fn ids_follow_registration_order() {
    let mut reg = Registry::new();
    let a = reg.register(TARGET, Idle);
    let b = reg.register(TargetId(2), Idle);
    let c = reg.register(TARGET, Idle);
    assert_eq!(reg.ids(), vec![a, b, c]);
    assert_eq!(reg.ids_for_target(TARGET), vec![a, c]);
}

#[test]
fn relating_a_recognizer_to_itself_is_an_error() {
    let (mut reg, ids) = registry_with(1);
    assert_eq!(
        reg.recognize_simultaneously_with(ids[0], ids[0]),
        Err(GestureError::SelfRelation(ids[0]))
    );
    assert_eq!(reg.require_recognizer_to_fail(ids[0], ids[0]), Err(GestureError::SelfRelation(ids[0])));
}

#[test]
fn unknown_recognizer_is_an_error() {
    let (mut reg, ids) = registry_with(1);
    let ghost = RecognizerId(7);
    assert_eq!(reg.state(ghost), Err(GestureError::UnknownRecognizer(ghost)));
    assert_eq!(
        reg.recognize_simultaneously_with(ids[0], ghost),
        Err(GestureError::UnknownRecognizer(ghost))
    );
}

#[test]
fn relations_are_queryable() {
    let (mut reg, ids) = registry_with(3);
    reg.recognize_simultaneously_with(ids[0], ids[1]).unwrap();
    reg.require_recognizer_to_fail(ids[2], ids[0]).unwrap();
    assert!(reg.can_recognize_simultaneously_with(ids[1], ids[0]));
    assert!(reg.requires_recognizer_to_fail(ids[2], ids[0]));
    assert!(reg.required_to_fail_by_recognizer(ids[0], ids[2]));
    assert!(!reg.requires_recognizer_to_fail(ids[0], ids[2]));
}

#[test]
fn unregister_drops_recognizer_and_edges() {
    let (mut reg, ids) = registry_with(2);
    reg.recognize_simultaneously_with(ids[0], ids[1]).unwrap();
    reg.unregister(ids[1]).unwrap();
    assert_eq!(reg.ids(), vec![ids[0]]);
    assert!(!reg.can_recognize_simultaneously_with(ids[0], ids[1]));
    assert_eq!(reg.unregister(ids[1]), Err(GestureError::UnknownRecognizer(ids[1])));
}

// =============================================================
// Arbitration
// =============================================================

#[test]
fn beginning_fails_non_simultaneous_peers() {
    let (mut reg, ids) = registry_with(2);
    press(&mut reg);
    reg.request_transition(ids[0], GestureState::Began).unwrap();
    assert_eq!(reg.state(ids[0]).unwrap(), GestureState::Began);
    assert_eq!(reg.state(ids[1]).unwrap(), GestureState::Failed);
}

#[test]
fn simultaneous_peers_can_both_be_active() {
    let (mut reg, ids) = registry_with(2);
    reg.recognize_simultaneously_with(ids[0], ids[1]).unwrap();
    press(&mut reg);
    reg.request_transition(ids[0], GestureState::Began).unwrap();
    reg.request_transition(ids[1], GestureState::Began).unwrap();
    assert_eq!(reg.state(ids[0]).unwrap(), GestureState::Began);
    assert_eq!(reg.state(ids[1]).unwrap(), GestureState::Began);
}

#[test]
fn recognized_prerequisite_prevents_dependent() {
    let (mut reg, ids) = registry_with(2);
    reg.recognize_simultaneously_with(ids[0], ids[1]).unwrap();
    press(&mut reg);
    reg.request_transition(ids[0], GestureState::Began).unwrap();
    reg.require_recognizer_to_fail(ids[1], ids[0]).unwrap();
    assert_eq!(
        reg.request_transition(ids[1], GestureState::Began),
        Err(ArbitrationFailure::Prevented { by: ids[0] })
    );
    assert_eq!(reg.state(ids[1]).unwrap(), GestureState::Failed);
}

#[test]
fn dependent_defers_then_completes_when_prerequisite_fails() {
    let (mut reg, ids) = registry_with(2);
    reg.require_recognizer_to_fail(ids[1], ids[0]).unwrap();
    let log = record(&mut reg, ids[1]);
    press(&mut reg);

    assert_eq!(
        reg.request_transition(ids[1], GestureState::Began),
        Err(ArbitrationFailure::Deferred { waiting_on: ids[0] })
    );
    assert_eq!(reg.state(ids[1]).unwrap(), GestureState::Possible);
    assert_eq!(reg.core(ids[1]).unwrap().pending_state(), Some(GestureState::Began));

    reg.request_transition(ids[0], GestureState::Failed).unwrap();
    assert_eq!(reg.state(ids[1]).unwrap(), GestureState::Began);
    assert_eq!(states(&log), vec![GestureState::Began]);
}

#[test]
fn stale_deferral_is_dropped_when_input_ends() {
    let (mut reg, ids) = registry_with(2);
    reg.require_recognizer_to_fail(ids[1], ids[0]).unwrap();
    press(&mut reg);
    assert!(reg.request_transition(ids[1], GestureState::Began).is_err());
    send(&mut reg, &up(0.0, 0.0, Button::Primary, 10.0));
    assert_eq!(reg.core(ids[1]).unwrap().pending_state(), None);
}

#[test]
fn beginning_forces_waiting_dependents_to_fail() {
    let (mut reg, ids) = registry_with(2);
    reg.recognize_simultaneously_with(ids[0], ids[1]).unwrap();
    reg.require_recognizer_to_fail(ids[1], ids[0]).unwrap();
    press(&mut reg);
    reg.request_transition(ids[0], GestureState::Began).unwrap();
    assert_eq!(reg.state(ids[1]).unwrap(), GestureState::Failed);
}

#[test]
fn cascade_that_fails_the_requester_is_preempted() {
    let (mut reg, ids) = registry_with(3);
    let (a, p, d) = (ids[0], ids[1], ids[2]);
    reg.require_recognizer_to_fail(d, p).unwrap();
    press(&mut reg);

    assert!(reg.request_transition(d, GestureState::Began).is_err());
    assert_eq!(reg.request_transition(a, GestureState::Began), Err(ArbitrationFailure::Preempted));
    assert_eq!(reg.state(a).unwrap(), GestureState::Failed);
    assert_eq!(reg.state(p).unwrap(), GestureState::Failed);
    assert_eq!(reg.state(d).unwrap(), GestureState::Began);
}

#[test]
fn illegal_transitions_are_rejected() {
    let (mut reg, ids) = registry_with(1);
    press(&mut reg);
    assert_eq!(
        reg.request_transition(ids[0], GestureState::Changed),
        Err(ArbitrationFailure::IllegalTransition { from: GestureState::Possible, to: GestureState::Changed })
    );
    reg.request_transition(ids[0], GestureState::Began).unwrap();
    assert!(reg.request_transition(ids[0], GestureState::Failed).is_err());
    assert!(reg.request_transition(ids[0], GestureState::Possible).is_err());
}

#[test]
fn ending_resets_once_input_is_released() {
    let (mut reg, ids) = registry_with(1);
    press(&mut reg);
    reg.request_transition(ids[0], GestureState::Began).unwrap();
    reg.request_transition(ids[0], GestureState::Ended).unwrap();
    assert_eq!(reg.state(ids[0]).unwrap(), GestureState::Ended);
    send(&mut reg, &up(0.0, 0.0, Button::Primary, 10.0));
    assert_eq!(reg.state(ids[0]).unwrap(), GestureState::Possible);
}

// =============================================================
// Notification
// =============================================================

#[test]
fn failed_transitions_do_not_notify() {
    let (mut reg, ids) = registry_with(1);
    let log = record(&mut reg, ids[0]);
    press(&mut reg);
    reg.request_transition(ids[0], GestureState::Failed).unwrap();
    assert!(log.borrow().is_empty());
    assert!(reg.take_changes().is_empty());
}

#[test]
fn listeners_run_before_callbacks() {
    let (mut reg, ids) = registry_with(1);
    let order = Rc::new(RefCell::new(Vec::new()));
    let cb_order = Rc::clone(&order);
    reg.add_gesture_callback(ids[0], move |_: &GestureChange| cb_order.borrow_mut().push("callback"))
        .unwrap();
    let l_order = Rc::clone(&order);
    reg.add_listener(ids[0], move |_: &GestureChange| l_order.borrow_mut().push("listener"))
        .unwrap();
    press(&mut reg);
    reg.request_transition(ids[0], GestureState::Began).unwrap();
    assert_eq!(*order.borrow(), vec!["listener", "callback"]);
}

#[test]
fn removed_listener_is_not_called() {
    let (mut reg, ids) = registry_with(1);
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    let handle = reg.add_listener(ids[0], move |_: &GestureChange| *sink.borrow_mut() += 1).unwrap();
    assert!(reg.remove_listener(ids[0], handle).unwrap());
    assert!(!reg.remove_listener(ids[0], handle).unwrap());
    press(&mut reg);
    reg.request_transition(ids[0], GestureState::Began).unwrap();
    assert_eq!(*count.borrow(), 0);
}

#[test]
fn changes_are_drained_in_order() {
    let (mut reg, ids) = registry_with(1);
    press(&mut reg);
    reg.request_transition(ids[0], GestureState::Began).unwrap();
    reg.request_transition(ids[0], GestureState::Changed).unwrap();
    let changes = reg.take_changes();
    assert_eq!(changes.len(), 2);
    assert_eq!(changes[0].state, GestureState::Began);
    assert_eq!(changes[1].recognizer, ids[0]);
    assert!(reg.take_changes().is_empty());
}

// =============================================================
// Event filtering
// =============================================================

#[test]
fn disabled_recognizer_ignores_input() {
    let (mut reg, ids) = registry_with(1);
    reg.set_enabled(ids[0], false).unwrap();
    assert!(!reg.dispatch(TARGET, &down(0.0, 0.0, Button::Primary, 0.0)).unwrap());
    assert_eq!(reg.core(ids[0]).unwrap().mouse_button_mask(), 0);
}

#[test]
fn consumed_event_is_ignored_while_possible() {
    let (mut reg, ids) = registry_with(1);
    let mut event = down(0.0, 0.0, Button::Primary, 0.0);
    event.default_prevented = true;
    send(&mut reg, &event);
    assert_eq!(reg.core(ids[0]).unwrap().mouse_button_mask(), 0);
}

#[test]
fn synthesized_mouse_down_during_touch_is_ignored() {
    let (mut reg, ids) = registry_with(1);
    send(&mut reg, &touches(TouchPhase::Start, &[(1, 5.0, 5.0)], 0.0));
    send(&mut reg, &down(5.0, 5.0, Button::Primary, 1.0));
    assert_eq!(reg.core(ids[0]).unwrap().mouse_button_mask(), 0);
    assert_eq!(reg.core(ids[0]).unwrap().touch_count(), 1);
}

#[test]
fn events_for_other_targets_are_not_delivered() {
    let mut reg = Registry::new();
    let other = reg.register(TargetId(9), Idle);
    send(&mut reg, &down(0.0, 0.0, Button::Primary, 0.0));
    assert_eq!(reg.core(other).unwrap().mouse_button_mask(), 0);
}
