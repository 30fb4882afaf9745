//! Pan: translation by one or more touches, or the primary mouse button.
//!
//! The touch count must stay inside `[min_touches, max_touches]` when the
//! deadzone is crossed, otherwise the pan fails for the rest of the
//! interaction. Once active, changes in touch count only shift the centroid;
//! the core folds that shift into the translation.
//!
//! A pan built with [`Pan::yielding_vertical`] fails when a single touch
//! crosses the deadzone moving mostly up or down, so a tilt that waits on it
//! can take over.

#[cfg(test)]
#[path = "pan_test.rs"]
mod pan_test;

use crate::consts::PAN_INTERPRET_DISTANCE_PX;
use crate::event::Button;
use crate::recognizer::{Gesture, GestureKind, HookCx, any_touch_moved_beyond};
use crate::state::GestureState;
use crate::touch::Touch;

#[derive(Debug, Clone)]
pub struct Pan {
    min_touches: usize,
    max_touches: usize,
    interpret_distance: f64,
    yield_vertical: bool,
}

impl Default for Pan {
    fn default() -> Self {
        Self {
            min_touches: 1,
            max_touches: usize::MAX,
            interpret_distance: PAN_INTERPRET_DISTANCE_PX,
            yield_vertical: false,
        }
    }
}

impl Pan {
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

    #[must_use]
    pub fn with_interpret_distance(mut self, distance: f64) -> Self {
        self.interpret_distance = distance;
        self
    }

    /// Fail on a single-touch move that is more vertical than horizontal.
    #[must_use]
    pub fn yielding_vertical(mut self) -> Self {
        self.yield_vertical = true;
        self
    }

    #[must_use]
    pub fn min_touches(&self) -> usize {
        self.min_touches
    }

    #[must_use]
    pub fn max_touches(&self) -> usize {
        self.max_touches
    }

    fn accepts(&self, count: usize) -> bool {
        (self.min_touches..=self.max_touches).contains(&count)
    }

    fn yields_to_vertical(&self, touches: &[Touch]) -> bool {
        let [touch] = touches else {
            return false;
        };
        self.yield_vertical && touch.translation_y().abs() > touch.translation_x().abs()
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

impl Gesture for Pan {
    fn kind(&self) -> GestureKind {
        GestureKind::Pan
    }

    fn mouse_down(&mut self, cx: &mut HookCx<'_>, button: Button) {
        if cx.state() == GestureState::Possible && button != Button::Primary {
            cx.request(GestureState::Failed);
        }
    }

    fn mouse_move(&mut self, cx: &mut HookCx<'_>) {
        match cx.state() {
            GestureState::Possible => {
                if cx.core().translation().length() <= self.interpret_distance {
                    return;
                }
                if cx.core().mouse_button_mask() == Button::Primary.bit() {
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
                if self.yields_to_vertical(cx.core().touches()) {
                    cx.request(GestureState::Failed);
                } else if self.accepts(cx.core().touch_count()) {
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
