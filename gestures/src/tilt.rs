//! Tilt: a vertical touch drag.
//!
//! A specialized pan. When the deadzone is crossed every touch must be moving
//! mostly vertically, all in the same direction. With two or more touches
//! the fingers must also stay close together and move in step.

#[cfg(test)]
#[path = "tilt_test.rs"]
mod tilt_test;

use crate::consts::{PAN_INTERPRET_DISTANCE_PX, TILT_MAX_TOUCH_DISTANCE_PX, TILT_MAX_TOUCH_DIVERGENCE_PX};
use crate::event::Button;
use crate::recognizer::{Gesture, GestureKind, HookCx, RecognizerCore, any_touch_moved_beyond};
use crate::state::GestureState;
use crate::touch::Touch;

#[derive(Debug, Clone)]
pub struct Tilt {
    min_touches: usize,
    max_touches: usize,
    interpret_distance: f64,
    max_touch_distance: f64,
    max_touch_divergence: f64,
}

impl Default for Tilt {
    fn default() -> Self {
        Self {
            min_touches: 1,
            max_touches: 1,
            interpret_distance: PAN_INTERPRET_DISTANCE_PX,
            max_touch_distance: TILT_MAX_TOUCH_DISTANCE_PX,
            max_touch_divergence: TILT_MAX_TOUCH_DIVERGENCE_PX,
        }
    }
}

impl Tilt {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept only touch counts in `[min, max]`.
    #[must_use]
    pub fn with_touch_range(mut self, min: usize, max: usize) -> Self {
        self.min_touches = min;
        self.max_touches = max.max(min);
        self
    }

    /// Whether the current touches describe a tilt.
    fn is_tilt(&self, core: &RecognizerCore) -> bool {
        let touches = core.touches();
        if !(self.min_touches..=self.max_touches).contains(&touches.len()) {
            return false;
        }

        let Some(first) = touches.first() else {
            return false;
        };
        let direction = first.translation_y().signum();
        let vertical = touches.iter().all(|t| {
            let d = t.translation();
            d.y.abs() > d.x.abs() && d.y.signum() == direction
        });
        if !vertical {
            return false;
        }

        match touches {
            [a, b, ..] => {
                a.client().distance_to(b.client()) < self.max_touch_distance
                    && (a.translation() - b.translation()).length() < self.max_touch_divergence
            }
            _ => true,
        }
    }

    fn input_released(cx: &mut HookCx<'_>, terminal: GestureState) {
        if cx.core().touch_count() > 0 {
            return;
        }
        match cx.state() {
            GestureState::Possible => cx.request(GestureState::Failed),
            GestureState::Began | GestureState::Changed => cx.request(terminal),
            _ => {}
        }
    }
}

impl Gesture for Tilt {
    fn kind(&self) -> GestureKind {
        GestureKind::Tilt
    }

    fn mouse_down(&mut self, cx: &mut HookCx<'_>, _button: Button) {
        if cx.state() == GestureState::Possible {
            cx.request(GestureState::Failed);
        }
    }

    fn touch_start(&mut self, cx: &mut HookCx<'_>, _touch: &Touch) {
        if cx.state() == GestureState::Possible && cx.core().touch_count() > self.max_touches {
            cx.request(GestureState::Failed);
        }
    }

    fn touch_move(&mut self, cx: &mut HookCx<'_>, _touch: &Touch) {
        match cx.state() {
            GestureState::Possible => {
                if !any_touch_moved_beyond(cx.core(), self.interpret_distance) {
                    return;
                }
                if self.is_tilt(cx.core()) {
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

    fn touch_cancel(&mut self, cx: &mut HookCx<'_>, _touch: &Touch) {
        Self::input_released(cx, GestureState::Cancelled);
    }

    fn touch_end(&mut self, cx: &mut HookCx<'_>, _touch: &Touch) {
        Self::input_released(cx, GestureState::Ended);
    }
}
