use tracing::{debug, info, warn};

use crate::consts::{MIN_RANGE, WHEEL_ZOOM_DIVISOR};
use crate::controller::{ControllerBase, GestureEventListener, WindowController, WorldWindow};
use crate::drag::Drag;
use crate::event::{Button, DomEvent, InputEvent, WheelDelta};
use crate::geo::{
    Location, Point, clamped_latitude, clamped_range, normalized_degrees, normalized_degrees_longitude,
    perspective_pixel_size,
};
use crate::pan::Pan;
use crate::pinch::Pinch;
use crate::recognizer::{GestureDetail, TargetId};
use crate::registry::{GestureChange, GestureError, ListenerId, RecognizerId, Registry};
use crate::rotation::Rotation;
use crate::state::GestureState;
use crate::tilt::Tilt;

#[cfg(test)]
#[path = "basic_test.rs"]
mod basic_test;

/// Target handle the basic controller registers its recognizers under.
pub const WORLD_WINDOW_TARGET: TargetId = TargetId(0);

/// Recognizers created by [`BasicWindowController::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasicRecognizers {
    pub primary_drag: RecognizerId,
    pub secondary_drag: RecognizerId,
    pub pan: RecognizerId,
    pub pinch: RecognizerId,
    pub rotation: RecognizerId,
    pub tilt: RecognizerId,
}

/// Globe navigation driven by the six standard gestures plus the wheel.
///
/// Primary drag and pan move the look-at location, secondary drag changes
/// heading and tilt, pinch changes range, rotation changes heading, tilt
/// changes tilt, and the wheel zooms. Every mutation is followed by
/// [`WindowController::apply_limits`] and a redraw request.
#[derive(Debug)]
pub struct BasicWindowController<W: WorldWindow> {
    base: ControllerBase,
    wwd: W,
    registry: Registry,
    recognizers: BasicRecognizers,
    begin_point: Point,
    last_point: Point,
    begin_heading: f64,
    begin_tilt: f64,
    begin_range: f64,
    last_rotation: f64,
}

impl<W: WorldWindow> BasicWindowController<W> {
    /// Create the controller and its recognizers for `wwd`.
    ///
    /// # Errors
    ///
    /// Propagates [`GestureError`] from wiring the recognizer relations.
    pub fn new(wwd: W) -> Result<Self, GestureError> {
        let mut registry = Registry::new();
        let target = WORLD_WINDOW_TARGET;
        let recognizers = BasicRecognizers {
            primary_drag: registry.register(target, Drag::new()),
            secondary_drag: registry.register(target, Drag::with_button(Button::Secondary)),
            // Mostly vertical single-finger drags are left to tilt; mouse pans
            // go to the primary drag, which interprets sooner.
            pan: registry.register(target, Pan::new().yielding_vertical()),
            pinch: registry.register(target, Pinch::new()),
            rotation: registry.register(target, Rotation::new()),
            tilt: registry.register(target, Tilt::new()),
        };

        let r = recognizers;
        registry.recognize_simultaneously_with(r.pan, r.pinch)?;
        registry.recognize_simultaneously_with(r.pan, r.rotation)?;
        registry.recognize_simultaneously_with(r.pinch, r.rotation)?;
        registry.require_recognizer_to_fail(r.tilt, r.pan)?;
        registry.require_recognizer_to_fail(r.tilt, r.pinch)?;
        registry.require_recognizer_to_fail(r.tilt, r.rotation)?;

        Ok(Self {
            base: ControllerBase::new(),
            wwd,
            registry,
            recognizers,
            begin_point: Point::default(),
            last_point: Point::default(),
            begin_heading: 0.0,
            begin_tilt: 0.0,
            begin_range: 0.0,
            last_rotation: 0.0,
        })
    }

    // --- Accessors ---

    #[must_use]
    pub fn world_window(&self) -> &W {
        &self.wwd
    }

    pub fn world_window_mut(&mut self) -> &mut W {
        &mut self.wwd
    }

    #[must_use]
    pub fn recognizers(&self) -> BasicRecognizers {
        self.recognizers
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The registry, for adding application recognizers (e.g. a click).
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn add_gesture_listener<L>(&mut self, listener: L) -> ListenerId
    where
        L: GestureEventListener + 'static,
    {
        self.base.add_gesture_listener(listener)
    }

    /// # Errors
    ///
    /// Returns [`GestureError::UnknownListener`] if `id` is not registered.
    pub fn remove_gesture_listener(&mut self, id: ListenerId) -> Result<(), GestureError> {
        self.base.remove_gesture_listener(id)
    }

    /// Fire recognizer timers that expired by `now_ms` on the host clock.
    pub fn advance_clock(&mut self, now_ms: f64) {
        self.registry.advance_clock(now_ms);
        self.drain_changes();
    }

    fn drain_changes(&mut self) {
        for change in self.registry.take_changes() {
            self.gesture_state_changed(&change);
        }
    }

    fn canvas_size(&self) -> Option<(f64, f64)> {
        let (width, height) = self.wwd.canvas_size();
        (width > 0.0 && height > 0.0).then_some((width, height))
    }

    fn commit(&mut self) {
        self.apply_limits();
        self.wwd.redraw();
    }

    // --- Gesture handlers ---

    fn handle_pan_or_drag(&mut self, change: &GestureChange) {
        if self.wwd.globe().is_2d() {
            self.handle_pan_or_drag_2d(change);
        } else {
            self.handle_pan_or_drag_3d(change);
        }
    }

    fn handle_pan_or_drag_3d(&mut self, change: &GestureChange) {
        let t = change.translation;
        match change.state {
            GestureState::Began => self.last_point = Point::default(),
            GestureState::Changed => {
                let Some((width, height)) = self.canvas_size() else {
                    return;
                };
                let delta = t - self.last_point;
                self.last_point = t;

                let globe = self.wwd.globe();
                let globe_radius = globe.equatorial_radius().max(globe.polar_radius());
                if globe_radius <= 0.0 {
                    return;
                }
                let navigator = self.wwd.navigator();
                let meters_per_pixel = perspective_pixel_size(width, height, navigator.range.max(MIN_RANGE));
                let forward_degrees = (delta.y * meters_per_pixel / globe_radius).to_degrees();
                let side_degrees = (-delta.x * meters_per_pixel / globe_radius).to_degrees();
                let (sin_heading, cos_heading) = navigator.heading.to_radians().sin_cos();

                let look_at = &mut self.wwd.navigator_mut().look_at_location;
                look_at.latitude += forward_degrees * cos_heading - side_degrees * sin_heading;
                look_at.longitude += forward_degrees * sin_heading + side_degrees * cos_heading;
                self.commit();
            }
            _ => {}
        }
    }

    fn handle_pan_or_drag_2d(&mut self, change: &GestureChange) {
        match change.state {
            GestureState::Began => {
                self.begin_point = change.client;
                self.last_point = change.client;
            }
            GestureState::Changed => {
                let from = self.last_point;
                let to = self.begin_point + change.translation;
                self.last_point = to;

                let Some(from_loc) = self.ground_location(from) else {
                    return;
                };
                let Some(to_loc) = self.ground_location(to) else {
                    return;
                };
                let look_at = &mut self.wwd.navigator_mut().look_at_location;
                look_at.latitude -= to_loc.latitude - from_loc.latitude;
                look_at.longitude -= to_loc.longitude - from_loc.longitude;
                self.commit();
            }
            _ => {}
        }
    }

    /// Geographic location under a client point, if the eye ray hits the globe.
    fn ground_location(&self, client: Point) -> Option<Location> {
        let canvas = self.wwd.canvas_coordinates(client.x, client.y);
        let ray = self.wwd.ray_through_screen_point(canvas)?;
        let globe = self.wwd.globe();
        let point = globe.intersects_line(&ray)?;
        Some(globe.compute_position_from_point(point))
    }

    fn handle_secondary_drag(&mut self, change: &GestureChange) {
        match change.state {
            GestureState::Began => {
                let navigator = self.wwd.navigator();
                self.begin_heading = navigator.heading;
                self.begin_tilt = navigator.tilt;
            }
            GestureState::Changed => {
                let Some((width, height)) = self.canvas_size() else {
                    return;
                };
                let heading_degrees = 180.0 * change.translation.x / width;
                let tilt_degrees = 90.0 * change.translation.y / height;
                let navigator = self.wwd.navigator_mut();
                navigator.heading = self.begin_heading + heading_degrees;
                navigator.tilt = self.begin_tilt - tilt_degrees;
                self.commit();
            }
            _ => {}
        }
    }

    fn handle_pinch(&mut self, change: &GestureChange) {
        let GestureDetail::Scale(scale) = change.detail else {
            return;
        };
        match change.state {
            // The scale already holds the change that crossed the threshold.
            GestureState::Began => self.begin_range = self.wwd.navigator().range * scale,
            GestureState::Changed => {
                if scale != 0.0 {
                    self.wwd.navigator_mut().range = self.begin_range / scale;
                    self.commit();
                }
            }
            _ => {}
        }
    }

    fn handle_rotation(&mut self, change: &GestureChange) {
        let GestureDetail::Rotation(rotation) = change.detail else {
            return;
        };
        match change.state {
            GestureState::Began => self.last_rotation = rotation,
            GestureState::Changed => {
                self.wwd.navigator_mut().heading -= rotation - self.last_rotation;
                self.last_rotation = rotation;
                self.commit();
            }
            _ => {}
        }
    }

    fn handle_tilt(&mut self, change: &GestureChange) {
        match change.state {
            GestureState::Began => self.begin_tilt = self.wwd.navigator().tilt,
            GestureState::Changed => {
                let Some((_, height)) = self.canvas_size() else {
                    return;
                };
                let tilt_degrees = -90.0 * change.translation.y / height;
                self.wwd.navigator_mut().tilt = self.begin_tilt + tilt_degrees;
                self.commit();
            }
            _ => {}
        }
    }

    fn handle_wheel(&mut self, delta: &WheelDelta) {
        let scale = 1.0 + delta.normalized_dy() / WHEEL_ZOOM_DIVISOR;
        self.wwd.navigator_mut().range *= scale;
        self.commit();
    }
}

impl<W: WorldWindow> WindowController for BasicWindowController<W> {
    fn on_gesture_event(&mut self, event: &DomEvent) -> bool {
        if self.base.on_gesture_event(event) {
            return true;
        }

        let normalized = match event.normalize() {
            Ok(Some(normalized)) => normalized,
            Ok(None) => return false,
            Err(e) => {
                info!(error = %e, "ignoring input event");
                return false;
            }
        };

        if let InputEvent::Wheel(delta) = &normalized.input {
            self.handle_wheel(delta);
            return true;
        }

        let handled = match self.registry.dispatch(WORLD_WINDOW_TARGET, &normalized) {
            Ok(handled) => handled,
            Err(e) => {
                warn!(error = %e, event = %event.kind, "gesture dispatch failed");
                false
            }
        };
        self.drain_changes();
        handled
    }

    fn gesture_state_changed(&mut self, change: &GestureChange) {
        debug!(recognizer = %change.recognizer, kind = %change.kind, state = %change.state, "gesture state changed");
        let r = self.recognizers;
        if change.recognizer == r.primary_drag || change.recognizer == r.pan {
            self.handle_pan_or_drag(change);
        } else if change.recognizer == r.secondary_drag {
            self.handle_secondary_drag(change);
        } else if change.recognizer == r.pinch {
            self.handle_pinch(change);
        } else if change.recognizer == r.rotation {
            self.handle_rotation(change);
        } else if change.recognizer == r.tilt {
            self.handle_tilt(change);
        }
    }

    fn apply_limits(&mut self) {
        let globe = self.wwd.globe();
        let limit_2d = globe.is_2d();
        let max_range_2d = 2.0 * std::f64::consts::PI * globe.equatorial_radius();

        let navigator = self.wwd.navigator_mut();
        let look_at = &mut navigator.look_at_location;
        look_at.latitude = clamped_latitude(look_at.latitude);
        look_at.longitude = normalized_degrees_longitude(look_at.longitude);
        navigator.range = clamped_range(navigator.range, f64::MAX);
        navigator.heading = normalized_degrees(navigator.heading);
        navigator.tilt = navigator.tilt.clamp(0.0, 90.0);
        navigator.roll = normalized_degrees(navigator.roll);

        if limit_2d && navigator.enable_2d_limits {
            navigator.range = clamped_range(navigator.range, max_range_2d);
            navigator.tilt = 0.0;
        }
    }
}
