//! Replays recorded input events through a [`BasicWindowController`].
//!
//! Input is JSON lines, one DOM-shaped event per line (see
//! [`gestures::event::DomEvent`]). Blank lines and lines starting with `#` are
//! skipped. Every observable recognizer transition is logged as it happens.

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use std::cell::Cell;
use std::io::{self, BufRead};
use std::rc::Rc;

use gestures::basic::BasicWindowController;
use gestures::controller::{WindowController, WorldWindow};
use gestures::event::DomEvent;
use gestures::geo::Navigator;
use gestures::registry::{GestureChange, GestureError};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::window::{SimulatedGlobe, SimulatedWindow};

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
    #[error("invalid event on line {line}: {source}")]
    Json { line: usize, source: serde_json::Error },
    #[error("failed to encode report: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("controller setup failed: {0}")]
    Gesture(#[from] GestureError),
}

/// Outcome of a replay, printed as JSON by the binary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub events: usize,
    pub handled: usize,
    pub transitions: usize,
    pub frames: u64,
    pub navigator: Navigator,
}

/// Build the controller described by `config`, bound to a simulated window.
///
/// # Errors
///
/// Returns [`ReplayError::Gesture`] if the recognizers cannot be wired.
pub fn build_controller(config: &Config) -> Result<BasicWindowController<SimulatedWindow>, ReplayError> {
    let navigator = Navigator { range: config.range, ..Navigator::default() };
    let wwd = SimulatedWindow::new(SimulatedGlobe::new(config.globe_2d), navigator, config.canvas_width, config.canvas_height);
    let mut controller = BasicWindowController::new(wwd)?;
    controller.apply_limits();
    Ok(controller)
}

/// Feed every event in `reader` to `controller`.
///
/// # Errors
///
/// Returns [`ReplayError::Io`] if reading fails and [`ReplayError::Json`] for
/// the first line that is not a valid event. Events before the bad line have
/// already been applied.
pub fn replay<R: BufRead>(
    reader: R,
    controller: &mut BasicWindowController<SimulatedWindow>,
) -> Result<ReplayReport, ReplayError> {
    let transitions = Rc::new(Cell::new(0_usize));
    let registry = controller.registry_mut();
    for id in registry.ids() {
        let count = Rc::clone(&transitions);
        registry.add_listener(id, move |change: &GestureChange| {
            count.set(count.get() + 1);
            info!(
                recognizer = %change.recognizer,
                kind = %change.kind,
                state = %change.state,
                x = change.translation.x,
                y = change.translation.y,
                "gesture"
            );
        })?;
    }

    let mut events = 0;
    let mut handled = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let event = DomEvent::from_json(trimmed).map_err(|source| ReplayError::Json { line: index + 1, source })?;
        events += 1;
        if controller.on_gesture_event(&event) {
            handled += 1;
        } else {
            debug!(line = index + 1, kind = %event.kind, "event not handled");
        }
    }

    let wwd = controller.world_window();
    Ok(ReplayReport {
        events,
        handled,
        transitions: transitions.get(),
        frames: wwd.frames(),
        navigator: *wwd.navigator(),
    })
}
