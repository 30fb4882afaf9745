//! Two-finger rotation.
//!
//! Rotation is the change, in degrees, of the angle of the segment between
//! the first two tracked touches, normalized to `[-180, 180]`. As with
//! [`crate::pinch::Pinch`], forming a new pair folds the rotation so far into
//! `offset`.

#[cfg(test)]
#[path = "rotation_test.rs"]
mod rotation_test;

use crate::consts::{PAN_INTERPRET_DISTANCE_PX, ROTATION_THRESHOLD_DEG};
use crate::event::Button;
use crate::geo::normalized_degrees;
use crate::recognizer::{Gesture, GestureDetail, GestureKind, HookCx, RecognizerCore, any_touch_moved_beyond};
use crate::state::GestureState;
use crate::touch::{Touch, TouchId};

#[derive(Debug, Clone)]
pub struct Rotation {
    threshold: f64,
    pair: Vec<TouchId>,
    reference_angle: f64,
    rotation: f64,
    offset: f64,
}

impl Default for Rotation {
    fn default() -> Self {
        Self { threshold: ROTATION_THRESHOLD_DEG, pair: Vec::new(), reference_angle: 0.0, rotation: 0.0, offset: 0.0 }
    }
}

impl Rotation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Angle change, in degrees, needed before the rotation begins.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Rotation in degrees including the offset carried from earlier pairs.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation + self.offset
    }

    fn pair_angle(&self, core: &RecognizerCore) -> Option<f64> {
        let [a, b] = self.pair.as_slice() else {
            return None;
        };
        let a = core.touch_with_id(*a)?.client();
        let b = core.touch_with_id(*b)?.client();
        Some((b.y - a.y).atan2(b.x - a.x).to_degrees())
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

impl Gesture for Rotation {
    fn kind(&self) -> GestureKind {
        GestureKind::Rotation
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
        if let Some(angle) = self.pair_angle(cx.core()) {
            self.reference_angle = angle;
            self.offset += self.rotation;
            self.rotation = 0.0;
        }
    }

    fn touch_move(&mut self, cx: &mut HookCx<'_>, _touch: &Touch) {
        let Some(angle) = self.pair_angle(cx.core()) else {
            if cx.state() == GestureState::Possible && any_touch_moved_beyond(cx.core(), PAN_INTERPRET_DISTANCE_PX) {
                cx.request(GestureState::Failed);
            }
            return;
        };
        let rotation = normalized_degrees(angle - self.reference_angle);

        match cx.state() {
            GestureState::Possible => {
                if rotation.abs() > self.threshold {
                    self.rotation = rotation;
                    cx.request(GestureState::Began);
                }
            }
            GestureState::Began | GestureState::Changed => {
                self.rotation = rotation;
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
        GestureDetail::Rotation(self.rotation())
    }
}
