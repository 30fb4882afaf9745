use super::*;
use crate::event::TouchPhase;
use crate::fixture_test::*;
use crate::registry::{RecognizerId, Registry};

fn setup(click: Click) -> (Registry, RecognizerId) {
    let mut reg = Registry::new();
    let id = reg.register(TARGET, click);
    (reg, id)
}

fn click_at(reg: &mut Registry, x: f64, y: f64, down_ms: f64, up_ms: f64) {
    send(reg, &down(x, y, Button::Primary, down_ms));
    send(reg, &up(x, y, Button::Primary, up_ms));
}

// =============================================================
// Single click
// =============================================================

#[test]
fn quick_click_is_recognized() {
    let (mut reg, id) = setup(Click::new());
    let log = record(&mut reg, id);
    click_at(&mut reg, 10.0, 10.0, 0.0, 100.0);
    assert_eq!(states(&log), vec![GestureState::Recognized]);
    assert_eq!(log.borrow()[0].detail, GestureDetail::Clicks(1));
    assert_eq!(reg.state(id).unwrap(), GestureState::Possible);
    assert_eq!(reg.timer_deadline(id), None);
}

#[test]
fn small_jitter_is_tolerated() {
    let (mut reg, id) = setup(Click::new());
    let log = record(&mut reg, id);
    send(&mut reg, &down(10.0, 10.0, Button::Primary, 0.0));
    send(&mut reg, &drag_to(13.0, 10.0, 50.0));
    send(&mut reg, &up(13.0, 10.0, Button::Primary, 100.0));
    assert_eq!(states(&log), vec![GestureState::Recognized]);
}

#[test]
fn moving_five_pixels_fails() {
    let (mut reg, id) = setup(Click::new());
    let log = record(&mut reg, id);
    send(&mut reg, &down(10.0, 10.0, Button::Primary, 0.0));
    send(&mut reg, &drag_to(15.0, 10.0, 50.0));
    assert_eq!(reg.state(id).unwrap(), GestureState::Failed);
    send(&mut reg, &up(15.0, 10.0, Button::Primary, 100.0));
    assert!(log.borrow().is_empty());
    assert_eq!(reg.state(id).unwrap(), GestureState::Possible);
}

#[test]
fn long_press_fails_at_duration_deadline() {
    let (mut reg, id) = setup(Click::new());
    let log = record(&mut reg, id);
    send(&mut reg, &down(10.0, 10.0, Button::Primary, 0.0));
    assert_eq!(reg.timer_deadline(id), Some(500.0));
    reg.advance_clock(499.0);
    assert_eq!(reg.state(id).unwrap(), GestureState::Possible);
    reg.advance_clock(500.0);
    assert_eq!(reg.state(id).unwrap(), GestureState::Failed);
    send(&mut reg, &up(10.0, 10.0, Button::Primary, 600.0));
    assert!(log.borrow().is_empty());
}

#[test]
fn wrong_button_fails() {
    let (mut reg, id) = setup(Click::new());
    send(&mut reg, &down(10.0, 10.0, Button::Secondary, 0.0));
    assert_eq!(reg.state(id).unwrap(), GestureState::Failed);
}

#[test]
fn touch_fails_pending_click() {
    let (mut reg, id) = setup(Click::new().with_clicks(2));
    click_at(&mut reg, 10.0, 10.0, 0.0, 100.0);
    send(&mut reg, &touches(TouchPhase::Start, &[(1, 10.0, 10.0)], 150.0));
    assert_eq!(reg.state(id).unwrap(), GestureState::Failed);
    assert_eq!(reg.timer_deadline(id), None);
}

// =============================================================
// Double click
// =============================================================

#[test]
fn double_click_within_interval_is_recognized() {
    let (mut reg, id) = setup(Click::new().with_clicks(2));
    let log = record(&mut reg, id);
    click_at(&mut reg, 10.0, 10.0, 0.0, 100.0);
    assert_eq!(reg.state(id).unwrap(), GestureState::Possible);
    assert_eq!(reg.timer_deadline(id), Some(500.0));
    click_at(&mut reg, 11.0, 10.0, 300.0, 400.0);
    assert_eq!(states(&log), vec![GestureState::Recognized]);
    assert_eq!(log.borrow()[0].detail, GestureDetail::Clicks(2));
}

#[test]
fn second_click_after_interval_starts_over() {
    let (mut reg, id) = setup(Click::new().with_clicks(2));
    let log = record(&mut reg, id);
    click_at(&mut reg, 10.0, 10.0, 0.0, 100.0);
    click_at(&mut reg, 10.0, 10.0, 600.0, 700.0);
    assert!(log.borrow().is_empty());
    assert_eq!(reg.detail(id).unwrap(), GestureDetail::Clicks(1));
    click_at(&mut reg, 10.0, 10.0, 800.0, 900.0);
    assert_eq!(states(&log), vec![GestureState::Recognized]);
}

#[test]
fn second_click_far_from_first_fails() {
    let (mut reg, id) = setup(Click::new().with_clicks(2));
    click_at(&mut reg, 10.0, 10.0, 0.0, 100.0);
    send(&mut reg, &down(30.0, 10.0, Button::Primary, 200.0));
    assert_eq!(reg.state(id).unwrap(), GestureState::Failed);
}
