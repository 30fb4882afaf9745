//! Input model: raw DOM-shaped events and their normalized form.
//!
//! The host hands the engine [`DomEvent`]s exactly as the browser described
//! them (`type`, `clientX`, `changedTouches`, ...), typically deserialized
//! from JSON or converted from `web_sys` events. [`DomEvent::normalize`]
//! funnels the mouse, touch and pointer families into a single
//! [`InputEvent`] so recognizers only ever see three shapes: mouse, touch,
//! wheel.

#[cfg(test)]
#[path = "event_test.rs"]
mod event_test;

use serde::{Deserialize, Serialize};

use crate::consts::{WHEEL_LINE_PX, WHEEL_PAGE_PX};
use crate::geo::Point;
use crate::touch::TouchId;

/// Error returned by [`DomEvent::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventError {
    /// The `type` is not a mouse, touch, pointer or wheel event.
    #[error("unrecognized event type: {0}")]
    UnrecognizedType(String),
    /// A touch event arrived without any changed touches.
    #[error("{0} event has no changed touches")]
    MissingTouches(String),
}

/// Mouse button identifier, numbered as DOM `MouseEvent.button`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Button {
    /// Left mouse button (DOM button 0).
    #[default]
    Primary,
    /// Middle mouse button (DOM button 1).
    Middle,
    /// Right mouse button (DOM button 2).
    Secondary,
    /// Any other button (back, forward, ...), by DOM number.
    Other(u8),
}

impl Button {
    /// Map a DOM `button` number.
    #[must_use]
    pub fn from_dom(button: i16) -> Self {
        match button {
            1 => Self::Middle,
            2 => Self::Secondary,
            3.. => u8::try_from(button).map_or(Self::Primary, Self::Other),
            _ => Self::Primary,
        }
    }

    /// DOM button number.
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::Primary => 0,
            Self::Middle => 1,
            Self::Secondary => 2,
            Self::Other(n) => n,
        }
    }

    /// This button's bit in a recognizer's button mask (`1 << number`).
    ///
    /// Buttons beyond the width of the mask map to 0 and are never tracked.
    #[must_use]
    pub fn bit(self) -> u32 {
        1u32.checked_shl(u32::from(self.number())).unwrap_or(0)
    }
}

/// `WheelEvent.deltaMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeltaMode {
    /// `DOM_DELTA_PIXEL`.
    #[default]
    Pixel,
    /// `DOM_DELTA_LINE`.
    Line,
    /// `DOM_DELTA_PAGE`.
    Page,
}

impl DeltaMode {
    /// Map a DOM `deltaMode` number. Unknown modes are treated as pixels.
    #[must_use]
    pub fn from_dom(mode: u32) -> Self {
        match mode {
            1 => Self::Line,
            2 => Self::Page,
            _ => Self::Pixel,
        }
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelDelta {
    /// Horizontal scroll amount in `mode` units.
    pub dx: f64,
    /// Vertical scroll amount in `mode` units (positive = down / zoom out).
    pub dy: f64,
    /// Unit of `dx` and `dy`.
    pub mode: DeltaMode,
}

impl WheelDelta {
    /// Vertical delta in approximate pixels, consistent across browsers and devices.
    #[must_use]
    pub fn normalized_dy(&self) -> f64 {
        match self.mode {
            DeltaMode::Pixel => self.dy,
            DeltaMode::Line => self.dy * WHEEL_LINE_PX,
            DeltaMode::Page => self.dy * WHEEL_PAGE_PX,
        }
    }
}

/// One entry of a DOM `TouchList`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DomTouch {
    pub identifier: TouchId,
    pub client_x: f64,
    pub client_y: f64,
}

/// A raw input event as delivered by the host, keyed by `type`.
///
/// Only the fields relevant to the event family need to be present; the rest
/// default to zero/empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DomEvent {
    /// DOM event type: `mousedown`, `touchmove`, `pointerup`, `wheel`, ...
    #[serde(rename = "type")]
    pub kind: String,
    pub client_x: f64,
    pub client_y: f64,
    pub button: i16,
    /// `mouse`, `touch` or `pen` for pointer events.
    pub pointer_type: Option<String>,
    pub pointer_id: Option<TouchId>,
    pub changed_touches: Vec<DomTouch>,
    pub delta_x: f64,
    pub delta_y: f64,
    pub delta_mode: u32,
    /// Host clock in milliseconds (`Event.timeStamp`).
    pub time_stamp: f64,
    /// The host (or a gesture listener) already consumed this event.
    pub default_prevented: bool,
}

impl DomEvent {
    /// Convenience constructor for mouse-family events.
    #[must_use]
    pub fn mouse(kind: &str, x: f64, y: f64, button: i16, time_stamp: f64) -> Self {
        Self { kind: kind.to_owned(), client_x: x, client_y: y, button, time_stamp, ..Self::default() }
    }

    /// Convenience constructor for touch-family events.
    #[must_use]
    pub fn touch(kind: &str, touches: &[(TouchId, f64, f64)], time_stamp: f64) -> Self {
        let changed_touches = touches
            .iter()
            .map(|&(identifier, client_x, client_y)| DomTouch { identifier, client_x, client_y })
            .collect();
        Self { kind: kind.to_owned(), changed_touches, time_stamp, ..Self::default() }
    }

    /// Convenience constructor for wheel events.
    #[must_use]
    pub fn wheel(delta_y: f64, delta_mode: u32, time_stamp: f64) -> Self {
        Self { kind: "wheel".to_owned(), delta_y, delta_mode, time_stamp, ..Self::default() }
    }

    /// Parse a DOM event from its JSON description.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error for malformed input.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Funnel this event into the normalized input model.
    ///
    /// Returns `Ok(None)` for recognized event types that carry nothing for
    /// the recognizers (mouse `pointercancel`, pen pointers).
    ///
    /// # Errors
    ///
    /// Returns [`EventError::UnrecognizedType`] for event types outside the
    /// mouse/touch/pointer/wheel families and [`EventError::MissingTouches`]
    /// for touch events with an empty `changedTouches` list.
    pub fn normalize(&self) -> Result<Option<GestureEvent>, EventError> {
        let input = match self.kind.as_str() {
            "mousedown" => Some(self.mouse_input(MousePhase::Down, false)),
            "mousemove" => Some(self.mouse_input(MousePhase::Move, false)),
            "mouseup" => Some(self.mouse_input(MousePhase::Up, false)),
            "touchstart" => Some(self.touch_input(TouchPhase::Start)?),
            "touchmove" => Some(self.touch_input(TouchPhase::Move)?),
            "touchcancel" => Some(self.touch_input(TouchPhase::Cancel)?),
            "touchend" => Some(self.touch_input(TouchPhase::End)?),
            "wheel" => Some(InputEvent::Wheel(WheelDelta {
                dx: self.delta_x,
                dy: self.delta_y,
                mode: DeltaMode::from_dom(self.delta_mode),
            })),
            "pointerdown" | "pointermove" | "pointerup" | "pointercancel" => self.pointer_input()?,
            other => return Err(EventError::UnrecognizedType(other.to_owned())),
        };
        Ok(input.map(|input| GestureEvent {
            input,
            time_ms: self.time_stamp,
            default_prevented: self.default_prevented,
        }))
    }

    fn client(&self) -> Point {
        Point::new(self.client_x, self.client_y)
    }

    fn mouse_input(&self, phase: MousePhase, via_pointer: bool) -> InputEvent {
        InputEvent::Mouse(MouseInput { phase, point: self.client(), button: Button::from_dom(self.button), via_pointer })
    }

    fn touch_input(&self, phase: TouchPhase) -> Result<InputEvent, EventError> {
        if self.changed_touches.is_empty() {
            return Err(EventError::MissingTouches(self.kind.clone()));
        }
        let touches = self
            .changed_touches
            .iter()
            .map(|t| TouchInput { identifier: t.identifier, point: Point::new(t.client_x, t.client_y) })
            .collect();
        Ok(InputEvent::Touch(TouchInputs { phase, touches }))
    }

    fn pointer_input(&self) -> Result<Option<InputEvent>, EventError> {
        let pointer_type = self.pointer_type.as_deref().unwrap_or("mouse");
        match (pointer_type, self.kind.as_str()) {
            ("mouse", "pointerdown") => Ok(Some(self.mouse_input(MousePhase::Down, true))),
            ("mouse", "pointermove") => Ok(Some(self.mouse_input(MousePhase::Move, true))),
            ("mouse", "pointerup") => Ok(Some(self.mouse_input(MousePhase::Up, true))),
            ("touch", kind) => {
                let phase = match kind {
                    "pointerdown" => TouchPhase::Start,
                    "pointermove" => TouchPhase::Move,
                    "pointercancel" => TouchPhase::Cancel,
                    _ => TouchPhase::End,
                };
                let touch = TouchInput { identifier: self.pointer_id.unwrap_or_default(), point: self.client() };
                Ok(Some(InputEvent::Touch(TouchInputs { phase, touches: vec![touch] })))
            }
            // Mouse pointercancel has no defined meaning; pens are not tracked.
            _ => Ok(None),
        }
    }
}

/// Phase of a mouse-family event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MousePhase {
    Down,
    Move,
    Up,
}

/// Phase of a touch-family event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    Cancel,
    End,
}

/// A normalized mouse event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseInput {
    pub phase: MousePhase,
    pub point: Point,
    pub button: Button,
    /// Delivered as a pointer event rather than a legacy mouse event.
    pub via_pointer: bool,
}

/// One changed contact in a normalized touch event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchInput {
    pub identifier: TouchId,
    pub point: Point,
}

/// A normalized touch event: one phase, one or more changed contacts.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchInputs {
    pub phase: TouchPhase,
    pub touches: Vec<TouchInput>,
}

/// Normalized input family.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Mouse(MouseInput),
    Touch(TouchInputs),
    Wheel(WheelDelta),
}

/// A normalized event plus the envelope fields every recognizer consults.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureEvent {
    pub input: InputEvent,
    /// Host clock in milliseconds.
    pub time_ms: f64,
    pub default_prevented: bool,
}
