//! Discrete mouse click, single or multiple.
//!
//! Each press must be released within the maximum duration and each new
//! press must follow the previous release within the maximum interval.
//! Both limits are enforced with the registry's failure timer, so a click
//! that simply stops arriving still fails. Any touch fails the attempt.

#[cfg(test)]
#[path = "click_test.rs"]
mod click_test;

use crate::consts::{CLICK_MAX_DURATION_MS, CLICK_MAX_INTERVAL_MS, CLICK_MAX_MOVEMENT_PX};
use crate::event::Button;
use crate::geo::Point;
use crate::recognizer::{Gesture, GestureDetail, GestureKind, HookCx};
use crate::state::GestureState;
use crate::touch::Touch;

#[derive(Debug, Clone)]
pub struct Click {
    number_of_clicks: u32,
    button: Button,
    max_movement: f64,
    max_duration_ms: f64,
    max_interval_ms: f64,
    clicks: Vec<Point>,
}

impl Default for Click {
    fn default() -> Self {
        Self {
            number_of_clicks: 1,
            button: Button::Primary,
            max_movement: CLICK_MAX_MOVEMENT_PX,
            max_duration_ms: CLICK_MAX_DURATION_MS,
            max_interval_ms: CLICK_MAX_INTERVAL_MS,
            clicks: Vec::new(),
        }
    }
}

impl Click {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recognize after `count` clicks (at least one).
    #[must_use]
    pub fn with_clicks(mut self, count: u32) -> Self {
        self.number_of_clicks = count.max(1);
        self
    }

    #[must_use]
    pub fn with_button(mut self, button: Button) -> Self {
        self.button = button;
        self
    }

    #[must_use]
    pub fn with_timing(mut self, max_duration_ms: f64, max_interval_ms: f64) -> Self {
        self.max_duration_ms = max_duration_ms;
        self.max_interval_ms = max_interval_ms;
        self
    }

    #[must_use]
    pub fn number_of_clicks(&self) -> u32 {
        self.number_of_clicks
    }

    fn click_count(&self) -> u32 {
        u32::try_from(self.clicks.len()).unwrap_or(u32::MAX)
    }

    fn moved_too_far(&self, point: Point) -> bool {
        self.clicks.first().is_some_and(|first| first.distance_to(point) >= self.max_movement)
    }
}

impl Gesture for Click {
    fn kind(&self) -> GestureKind {
        GestureKind::Click
    }

    fn mouse_down(&mut self, cx: &mut HookCx<'_>, button: Button) {
        if cx.state() != GestureState::Possible {
            return;
        }
        let point = cx.core().client();
        if button != self.button || self.moved_too_far(point) {
            cx.request(GestureState::Failed);
            return;
        }
        self.clicks.push(point);
        cx.fail_after(self.max_duration_ms);
    }

    fn mouse_move(&mut self, cx: &mut HookCx<'_>) {
        if cx.state() == GestureState::Possible && self.moved_too_far(cx.core().client()) {
            cx.request(GestureState::Failed);
        }
    }

    fn mouse_up(&mut self, cx: &mut HookCx<'_>, button: Button) {
        if cx.state() != GestureState::Possible || button != self.button || cx.core().mouse_button_mask() != 0 {
            return;
        }
        if self.click_count() >= self.number_of_clicks {
            cx.cancel_timer();
            cx.request(GestureState::Recognized);
        } else {
            cx.fail_after(self.max_interval_ms);
        }
    }

    fn touch_start(&mut self, cx: &mut HookCx<'_>, _touch: &Touch) {
        if cx.state() == GestureState::Possible {
            cx.cancel_timer();
            cx.request(GestureState::Failed);
        }
    }

    fn reset(&mut self) {
        self.clicks.clear();
    }

    fn detail(&self) -> GestureDetail {
        GestureDetail::Clicks(self.click_count())
    }
}
