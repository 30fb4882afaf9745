#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn new_touch_has_zero_translation() {
    let t = Touch::new(7, 10.0, 20.0);
    assert_eq!(t.identifier(), 7);
    assert_eq!(t.translation_x(), 0.0);
    assert_eq!(t.translation_y(), 0.0);
    assert_eq!(t.start(), Point::new(10.0, 20.0));
}

#[test]
fn translation_is_current_minus_start() {
    let mut t = Touch::new(1, 10.0, 20.0);
    t.move_to(Point::new(13.0, 16.0));
    assert_eq!(t.client_x(), 13.0);
    assert_eq!(t.client_y(), 16.0);
    assert_eq!(t.translation_x(), 3.0);
    assert_eq!(t.translation_y(), -4.0);
    assert_eq!(t.translation().length(), 5.0);
}

#[test]
fn moving_keeps_identifier_and_start() {
    let mut t = Touch::new(42, 0.0, 0.0);
    t.move_to(Point::new(100.0, 100.0));
    t.move_to(Point::new(50.0, 25.0));
    assert_eq!(t.identifier(), 42);
    assert_eq!(t.start(), Point::new(0.0, 0.0));
    assert_eq!(t.client(), Point::new(50.0, 25.0));
}
