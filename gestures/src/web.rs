//! Browser event conversion.
//!
//! Hosts attach DOM listeners to the world window canvas and hand each raw
//! event to [`dom_event`], which copies the fields the recognizers read into a
//! plain [`DomEvent`].

use wasm_bindgen::JsCast;
use web_sys::{Event, MouseEvent, PointerEvent, TouchEvent, WheelEvent};

use crate::event::{DomEvent, DomTouch};

/// Snapshot a browser event. Fields irrelevant to the event family stay at
/// their defaults.
#[must_use]
pub fn dom_event(event: &Event) -> DomEvent {
    let mut out = DomEvent {
        kind: event.type_(),
        time_stamp: event.time_stamp(),
        default_prevented: event.default_prevented(),
        ..DomEvent::default()
    };

    // Wheel and pointer events are also mouse events; check them first.
    if let Some(wheel) = event.dyn_ref::<WheelEvent>() {
        out.delta_x = wheel.delta_x();
        out.delta_y = wheel.delta_y();
        out.delta_mode = wheel.delta_mode();
        copy_mouse(&mut out, wheel);
    } else if let Some(pointer) = event.dyn_ref::<PointerEvent>() {
        out.pointer_type = Some(pointer.pointer_type());
        out.pointer_id = Some(i64::from(pointer.pointer_id()));
        copy_mouse(&mut out, pointer);
    } else if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
        copy_mouse(&mut out, mouse);
    } else if let Some(touch) = event.dyn_ref::<TouchEvent>() {
        let list = touch.changed_touches();
        out.changed_touches = (0..list.length())
            .filter_map(|i| list.get(i))
            .map(|t| DomTouch {
                identifier: i64::from(t.identifier()),
                client_x: f64::from(t.client_x()),
                client_y: f64::from(t.client_y()),
            })
            .collect();
    }
    out
}

fn copy_mouse(out: &mut DomEvent, mouse: &MouseEvent) {
    out.client_x = f64::from(mouse.client_x());
    out.client_y = f64::from(mouse.client_y());
    out.button = mouse.button();
}
