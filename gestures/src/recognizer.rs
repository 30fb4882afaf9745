//! Recognizer base: per-recognizer input bookkeeping and the override points.
//!
//! DESIGN
//! ======
//! A recognizer is split in two. [`RecognizerCore`] is the part every gesture
//! shares: state, mouse button mask, active touches, and the smoothed
//! translation. [`Gesture`] is the part each concrete gesture supplies: the
//! override points (`mouse_down`, `touch_move`, ...) that interpret input.
//!
//! Hooks never mutate `state` directly. They receive a [`HookCx`] and call
//! [`HookCx::request`]; the registry applies the request after the hook
//! returns, running arbitration and notification. The same applies to the
//! click timers ([`HookCx::fail_after`]).
//!
//! Translation smoothing is a single-pole exponential filter anchored to the
//! touch centroid. When touches are added or removed, the centroid jumps; the
//! jump is folded into `centroid_shift` so the translation stays continuous.

#[cfg(test)]
#[path = "recognizer_test.rs"]
mod recognizer_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::TRANSLATION_WEIGHT;
use crate::event::{Button, MouseInput};
use crate::geo::Point;
use crate::registry::GestureError;
use crate::state::GestureState;
use crate::touch::{Touch, TouchId};

/// Opaque handle of the element a recognizer observes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct TargetId(pub u32);

/// Which concrete gesture a recognizer interprets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureKind {
    Drag,
    Pan,
    Pinch,
    Rotation,
    Tilt,
    Click,
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Drag => "drag",
            Self::Pan => "pan",
            Self::Pinch => "pinch",
            Self::Rotation => "rotation",
            Self::Tilt => "tilt",
            Self::Click => "click",
        };
        f.write_str(name)
    }
}

/// Gesture-specific parameter reported alongside a state change.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum GestureDetail {
    /// Only translation is meaningful (drag, pan, tilt).
    #[default]
    None,
    /// Pinch scale, `distance / reference distance` times the carried offset.
    Scale(f64),
    /// Rotation in degrees, plus the carried offset.
    Rotation(f64),
    /// Number of completed clicks.
    Clicks(u32),
}

// =============================================================================
// CORE
// =============================================================================

/// Input bookkeeping shared by every recognizer.
#[derive(Debug, Clone)]
pub struct RecognizerCore {
    target: TargetId,
    enabled: bool,
    pub(crate) state: GestureState,
    pub(crate) next_state: Option<GestureState>,
    client: Point,
    client_start: Point,
    translation: Point,
    weight: f64,
    mouse_button_mask: u32,
    touches: Vec<Touch>,
    centroid_shift: Point,
}

impl RecognizerCore {
    #[must_use]
    pub fn new(target: TargetId) -> Self {
        Self {
            target,
            enabled: true,
            state: GestureState::Possible,
            next_state: None,
            client: Point::default(),
            client_start: Point::default(),
            translation: Point::default(),
            weight: TRANSLATION_WEIGHT,
            mouse_button_mask: 0,
            touches: Vec::new(),
            centroid_shift: Point::default(),
        }
    }

    #[must_use]
    pub fn target(&self) -> TargetId {
        self.target
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Transition waiting on another recognizer to fail, if any.
    #[must_use]
    pub fn pending_state(&self) -> Option<GestureState> {
        self.next_state
    }

    /// Current gesture position (mouse point or touch centroid).
    #[must_use]
    pub fn client(&self) -> Point {
        self.client
    }

    /// Smoothed translation since the gesture started.
    #[must_use]
    pub fn translation(&self) -> Point {
        self.translation
    }

    #[must_use]
    pub fn mouse_button_mask(&self) -> u32 {
        self.mouse_button_mask
    }

    #[must_use]
    pub fn touch_count(&self) -> usize {
        self.touches.len()
    }

    #[must_use]
    pub fn touches(&self) -> &[Touch] {
        &self.touches
    }

    /// The active touch at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::TouchIndexOutOfRange`] when `index` is past the
    /// last active touch.
    pub fn touch(&self, index: usize) -> Result<&Touch, GestureError> {
        self.touches
            .get(index)
            .ok_or(GestureError::TouchIndexOutOfRange { index, count: self.touches.len() })
    }

    #[must_use]
    pub fn touch_with_id(&self, identifier: TouchId) -> Option<&Touch> {
        self.touches.iter().find(|t| t.identifier() == identifier)
    }

    /// No mouse button is down and no touch is active.
    #[must_use]
    pub fn input_ended(&self) -> bool {
        self.mouse_button_mask == 0 && self.touches.is_empty()
    }

    /// Zero the translation and re-anchor it at the current client point.
    pub fn zero_translation(&mut self) {
        self.translation = Point::default();
        self.client_start = self.client;
        self.centroid_shift = Point::default();
    }

    /// Return to `Possible` and forget all tracked input.
    pub(crate) fn reset(&mut self) {
        *self = Self { enabled: self.enabled, weight: self.weight, ..Self::new(self.target) };
    }

    fn smooth_translation(&mut self, dx: f64, dy: f64) {
        let w = self.weight;
        self.translation.x = self.translation.x * (1.0 - w) + dx * w;
        self.translation.y = self.translation.y * (1.0 - w) + dy * w;
    }

    fn touch_centroid(&self) -> Point {
        if self.touches.is_empty() {
            return Point::default();
        }
        #[allow(clippy::cast_precision_loss)]
        let n = self.touches.len() as f64;
        let sum = self.touches.iter().fold(Point::default(), |acc, t| acc + t.client());
        Point::new(sum.x / n, sum.y / n)
    }

    fn touches_added_or_removed(&mut self) {
        let centroid = self.touch_centroid();
        self.centroid_shift = self.centroid_shift + self.client - centroid;
        self.client = centroid;
    }

    // --- Base input handlers. Each returns whether the subclass hook should run. ---

    /// Track a mouse button press.
    pub(crate) fn begin_mouse(&mut self, input: &MouseInput) -> bool {
        if !input.via_pointer && !self.touches.is_empty() {
            return false; // synthesized mouse-down while touches are active
        }
        let bit = input.button.bit();
        if bit == 0 || self.mouse_button_mask & bit != 0 {
            return false; // untrackable or already down
        }
        if self.mouse_button_mask == 0 {
            self.client = input.point;
            self.client_start = input.point;
            self.translation = Point::default();
        }
        self.mouse_button_mask |= bit;
        true
    }

    /// Track mouse movement while a button is down.
    pub(crate) fn move_mouse(&mut self, point: Point) -> bool {
        if self.mouse_button_mask == 0 || self.client == point {
            return false;
        }
        let delta = point - self.client_start;
        self.client = point;
        self.smooth_translation(delta.x, delta.y);
        true
    }

    /// Track a mouse button release.
    pub(crate) fn end_mouse(&mut self, button: Button) -> bool {
        let bit = button.bit();
        if self.mouse_button_mask & bit == 0 {
            return false;
        }
        self.mouse_button_mask &= !bit;
        true
    }

    /// Track a new contact. Returns the touch as stored.
    pub(crate) fn begin_touch(&mut self, identifier: TouchId, point: Point) -> Option<Touch> {
        if self.touch_with_id(identifier).is_some() {
            return None;
        }
        let touch = Touch::new(identifier, point.x, point.y);
        self.touches.push(touch);
        if self.touches.len() == 1 {
            self.client = point;
            self.client_start = point;
            self.translation = Point::default();
            self.centroid_shift = Point::default();
        } else {
            self.touches_added_or_removed();
        }
        Some(touch)
    }

    /// Track contact movement. Returns the moved touch, or `None` for
    /// contacts this recognizer never saw start and for redundant moves.
    pub(crate) fn move_touch(&mut self, identifier: TouchId, point: Point) -> Option<Touch> {
        let touch = self.touches.iter_mut().find(|t| t.identifier() == identifier)?;
        if touch.client() == point {
            return None;
        }
        touch.move_to(point);
        let moved = *touch;

        let centroid = self.touch_centroid();
        let delta = centroid - self.client_start + self.centroid_shift;
        self.client = centroid;
        self.smooth_translation(delta.x, delta.y);
        Some(moved)
    }

    /// Stop tracking a contact (end or cancel). Returns the removed touch.
    pub(crate) fn end_touch(&mut self, identifier: TouchId) -> Option<Touch> {
        let index = self.touches.iter().position(|t| t.identifier() == identifier)?;
        let touch = self.touches.remove(index);
        if !self.touches.is_empty() {
            self.touches_added_or_removed();
        }
        Some(touch)
    }
}

// =============================================================================
// HOOKS
// =============================================================================

/// Timer request issued by a hook.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum TimerCommand {
    /// Fail the recognizer if it is still `Possible` after `delay_ms`.
    FailAfter { delay_ms: f64 },
    Cancel,
}

/// Context handed to every override point.
///
/// Gives read access to the recognizer's core, lets the hook re-anchor the
/// translation, and collects the state transition and timer the hook asks for.
pub struct HookCx<'a> {
    core: &'a mut RecognizerCore,
    now_ms: f64,
    requested: Option<GestureState>,
    timer: Option<TimerCommand>,
}

impl<'a> HookCx<'a> {
    pub(crate) fn new(core: &'a mut RecognizerCore, now_ms: f64) -> Self {
        Self { core, now_ms, requested: None, timer: None }
    }

    #[must_use]
    pub fn core(&self) -> &RecognizerCore {
        self.core
    }

    #[must_use]
    pub fn state(&self) -> GestureState {
        self.core.state
    }

    /// Host clock of the event being handled, in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Ask for a state transition once the hook returns.
    pub fn request(&mut self, state: GestureState) {
        self.requested = Some(state);
    }

    /// See [`RecognizerCore::zero_translation`].
    pub fn zero_translation(&mut self) {
        self.core.zero_translation();
    }

    /// Arm (or re-arm) this recognizer's failure timer.
    pub fn fail_after(&mut self, delay_ms: f64) {
        self.timer = Some(TimerCommand::FailAfter { delay_ms });
    }

    pub fn cancel_timer(&mut self) {
        self.timer = Some(TimerCommand::Cancel);
    }

    pub(crate) fn finish(self) -> (Option<GestureState>, Option<TimerCommand>) {
        (self.requested, self.timer)
    }
}

/// Override points a concrete gesture implements.
///
/// Every method has a no-op default. Mouse hooks run after the core has
/// updated the button mask and translation; touch hooks run after the core
/// has updated the touch list (for `touch_end`/`touch_cancel` the touch has
/// already been removed).
pub trait Gesture: fmt::Debug {
    fn kind(&self) -> GestureKind;

    fn mouse_down(&mut self, _cx: &mut HookCx<'_>, _button: Button) {}

    fn mouse_move(&mut self, _cx: &mut HookCx<'_>) {}

    fn mouse_up(&mut self, _cx: &mut HookCx<'_>, _button: Button) {}

    fn touch_start(&mut self, _cx: &mut HookCx<'_>, _touch: &Touch) {}

    fn touch_move(&mut self, _cx: &mut HookCx<'_>, _touch: &Touch) {}

    fn touch_cancel(&mut self, _cx: &mut HookCx<'_>, _touch: &Touch) {}

    fn touch_end(&mut self, _cx: &mut HookCx<'_>, _touch: &Touch) {}

    /// Runs after arbitration admits `Began`/`Recognized`, before listeners.
    fn prepare_to_recognize(&mut self, _core: &RecognizerCore) {}

    /// Forget gesture-specific state; called whenever the core resets.
    fn reset(&mut self) {}

    fn detail(&self) -> GestureDetail {
        GestureDetail::None
    }
}

/// Whether any active touch has moved farther than `distance` from its start.
#[must_use]
pub fn any_touch_moved_beyond(core: &RecognizerCore, distance: f64) -> bool {
    core.touches().iter().any(|t| t.translation().length() > distance)
}
