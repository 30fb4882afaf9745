//! Two-finger pinch.
//!
//! Scale is the current distance between the first two tracked touches over
//! their distance when the pair formed. Lifting one finger and putting down
//! another forms a new pair; the scale reached so far is carried in `offset`
//! so the reported value does not jump.

#[cfg(test)]
#[path = "pinch_test.rs"]
mod pinch_test;

use crate::consts::{PAN_INTERPRET_DISTANCE_PX, PINCH_THRESHOLD_PX};
use crate::event::Button;
use crate::geo::Point;
use crate::recognizer::{Gesture, GestureDetail, GestureKind, HookCx, RecognizerCore, any_touch_moved_beyond};
use crate::state::GestureState;
use crate::touch::{Touch, TouchId};

#[derive(Debug, Clone)]
pub struct Pinch {
    threshold: f64,
    pair: Vec<TouchId>,
    reference_distance: f64,
    scale: f64,
    offset: f64,
}

impl Default for Pinch {
    fn default() -> Self {
        Self { threshold: PINCH_THRESHOLD_PX, pair: Vec::new(), reference_distance: 0.0, scale: 1.0, offset: 1.0 }
    }
}

impl Pinch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Distance change, in pixels, needed before the pinch begins.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Scale including the offset carried from earlier pairs.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale * self.offset
    }

    fn pair_distance(&self, core: &RecognizerCore) -> Option<f64> {
        let [a, b] = self.pair.as_slice() else {
            return None;
        };
        let a: Point = core.touch_with_id(*a)?.client();
        let b: Point = core.touch_with_id(*b)?.client();
        Some(a.distance_to(b))
    }

    fn release(&mut self, cx: &mut HookCx<'_>, touch: &Touch, terminal: GestureState) {
        self.pair.retain(|&id| id != touch.identifier());
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

impl Gesture for Pinch {
    fn kind(&self) -> GestureKind {
        GestureKind::Pinch
    }

    fn mouse_down(&mut self, cx: &mut HookCx<'_>, _button: Button) {
        if cx.state() == GestureState::Possible {
            cx.request(GestureState::Failed);
        }
    }

    fn touch_start(&mut self, cx: &mut HookCx<'_>, touch: &Touch) {
        if self.pair.len() >= 2 {
            return;
        }
        self.pair.push(touch.identifier());
        if let Some(distance) = self.pair_distance(cx.core()) {
            self.reference_distance = distance;
            self.offset *= self.scale;
            self.scale = 1.0;
        }
    }

    fn touch_move(&mut self, cx: &mut HookCx<'_>, _touch: &Touch) {
        let Some(distance) = self.pair_distance(cx.core()) else {
            if cx.state() == GestureState::Possible && any_touch_moved_beyond(cx.core(), PAN_INTERPRET_DISTANCE_PX) {
                cx.request(GestureState::Failed);
            }
            return;
        };
        if self.reference_distance <= 0.0 {
            return;
        }

        match cx.state() {
            GestureState::Possible => {
                if (distance - self.reference_distance).abs() > self.threshold {
                    self.scale = distance / self.reference_distance;
                    cx.request(GestureState::Began);
                }
            }
            GestureState::Began | GestureState::Changed => {
                self.scale = distance / self.reference_distance;
                cx.request(GestureState::Changed);
            }
            _ => {}
        }
    }

    fn touch_cancel(&mut self, cx: &mut HookCx<'_>, touch: &Touch) {
        self.release(cx, touch, GestureState::Cancelled);
    }

    fn touch_end(&mut self, cx: &mut HookCx<'_>, touch: &Touch) {
        self.release(cx, touch, GestureState::Ended);
    }

    fn reset(&mut self) {
        *self = Self { threshold: self.threshold, ..Self::default() };
    }

    fn detail(&self) -> GestureDetail {
        GestureDetail::Scale(self.scale())
    }
}
