//! Mouse drag with a single button.
//!
//! Begins once the pointer has moved past the interpret distance with exactly
//! the configured button held. Touch input fails it outright: touch panning
//! belongs to [`crate::pan::Pan`].

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use crate::consts::DRAG_INTERPRET_DISTANCE_PX;
use crate::event::Button;
use crate::recognizer::{Gesture, GestureKind, HookCx};
use crate::state::GestureState;
use crate::touch::Touch;

#[derive(Debug, Clone)]
pub struct Drag {
    button: Button,
    interpret_distance: f64,
}

impl Default for Drag {
    fn default() -> Self {
        Self { button: Button::Primary, interpret_distance: DRAG_INTERPRET_DISTANCE_PX }
    }
}

impl Drag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drag with `button` instead of the primary button.
    #[must_use]
    pub fn with_button(button: Button) -> Self {
        Self { button, ..Self::default() }
    }

    #[must_use]
    pub fn with_interpret_distance(mut self, distance: f64) -> Self {
        self.interpret_distance = distance;
        self
    }

    #[must_use]
    pub fn button(&self) -> Button {
        self.button
    }
}

impl Gesture for Drag {
    fn kind(&self) -> GestureKind {
        GestureKind::Drag
    }

    fn mouse_move(&mut self, cx: &mut HookCx<'_>) {
        match cx.state() {
            GestureState::Possible => {
                if cx.core().translation().length() <= self.interpret_distance {
                    return;
                }
                if cx.core().mouse_button_mask() == self.button.bit() {
                    cx.zero_translation();
                    cx.request(GestureState::Began);
                } else {
                    cx.request(GestureState::Failed);
                }
            }
            GestureState::Began | GestureState::Changed => cx.request(GestureState::Changed),
            _ => {}
        }
    }

    fn mouse_up(&mut self, cx: &mut HookCx<'_>, _button: Button) {
        if cx.core().mouse_button_mask() == 0 && cx.state().is_active() {
            cx.request(GestureState::Ended);
        }
    }

    fn touch_start(&mut self, cx: &mut HookCx<'_>, _touch: &Touch) {
        if cx.state() == GestureState::Possible {
            cx.request(GestureState::Failed);
        }
    }
}
