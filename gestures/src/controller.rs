//! Window controller contract and the rendering collaborator it drives.
//!
//! A controller is the single entry point for input on one world window.
//! Application listeners registered on [`ControllerBase`] see every raw event
//! first and may claim it, which suppresses the controller's own handling.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::fmt;

use crate::event::DomEvent;
use crate::geo::{Line, Location, Navigator, Point, Vec3};
use crate::registry::{GestureChange, GestureError, ListenerId};

// =============================================================================
// COLLABORATORS
// =============================================================================

/// Globe model owned by the rendering host.
pub trait Globe {
    fn is_2d(&self) -> bool;

    fn equatorial_radius(&self) -> f64;

    fn polar_radius(&self) -> f64;

    /// First intersection of `line` with the globe surface, if any.
    fn intersects_line(&self, line: &Line) -> Option<Vec3>;

    /// Geographic position of a model-coordinate point on the surface.
    fn compute_position_from_point(&self, point: Vec3) -> Location;
}

/// The rendering host a controller navigates.
pub trait WorldWindow {
    fn globe(&self) -> &dyn Globe;

    fn navigator(&self) -> &Navigator;

    fn navigator_mut(&mut self) -> &mut Navigator;

    /// Canvas size in CSS pixels, `(width, height)`.
    fn canvas_size(&self) -> (f64, f64);

    /// Map client coordinates to canvas coordinates.
    fn canvas_coordinates(&self, client_x: f64, client_y: f64) -> Point;

    /// Eye ray through a canvas point, or `None` if it cannot be unprojected.
    fn ray_through_screen_point(&self, point: Point) -> Option<Line>;

    /// Request a new frame.
    fn redraw(&mut self);
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Application-level observer of raw input.
pub trait GestureEventListener {
    /// Return `true` to claim the event.
    fn on_gesture_event(&mut self, event: &DomEvent) -> bool;
}

impl<F> GestureEventListener for F
where
    F: FnMut(&DomEvent) -> bool,
{
    fn on_gesture_event(&mut self, event: &DomEvent) -> bool {
        self(event)
    }
}

pub trait WindowController {
    /// Deliver one raw input event. Returns whether it was handled.
    fn on_gesture_event(&mut self, event: &DomEvent) -> bool;

    /// React to a recognizer's observable transition.
    fn gesture_state_changed(&mut self, change: &GestureChange);

    /// Bring the navigator back within its limits.
    fn apply_limits(&mut self) {}
}

/// Listener list shared by every controller.
#[derive(Default)]
pub struct ControllerBase {
    listeners: Vec<(ListenerId, Box<dyn GestureEventListener>)>,
    next_id: u64,
}

impl fmt::Debug for ControllerBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerBase").field("listeners", &self.listeners.len()).finish()
    }
}

impl ControllerBase {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_gesture_listener<L>(&mut self, listener: L) -> ListenerId
    where
        L: GestureEventListener + 'static,
    {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// # Errors
    ///
    /// Returns [`GestureError::UnknownListener`] if `id` was never added or
    /// has already been removed.
    pub fn remove_gesture_listener(&mut self, id: ListenerId) -> Result<(), GestureError> {
        let index = self
            .listeners
            .iter()
            .position(|(handle, _)| *handle == id)
            .ok_or(GestureError::UnknownListener(id))?;
        self.listeners.remove(index);
        Ok(())
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Offer `event` to the listeners in order, stopping at the first that
    /// claims it.
    pub fn on_gesture_event(&mut self, event: &DomEvent) -> bool {
        self.listeners.iter_mut().any(|(_, listener)| listener.on_gesture_event(event))
    }
}
