#[cfg(test)]
#[path = "touch_test.rs"]
mod touch_test;

use serde::{Deserialize, Serialize};

use crate::geo::Point;

/// Stable identifier of one contact (DOM `Touch.identifier` or `pointerId`).
pub type TouchId = i64;

/// One active contact point tracked by a recognizer.
///
/// The identifier is fixed at creation; the current position moves with the
/// contact. Translation is always derived from current minus start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Touch {
    identifier: TouchId,
    client: Point,
    start: Point,
}

impl Touch {
    #[must_use]
    pub fn new(identifier: TouchId, client_x: f64, client_y: f64) -> Self {
        let p = Point::new(client_x, client_y);
        Self { identifier, client: p, start: p }
    }

    #[must_use]
    pub fn identifier(&self) -> TouchId {
        self.identifier
    }

    #[must_use]
    pub fn client_x(&self) -> f64 {
        self.client.x
    }

    #[must_use]
    pub fn client_y(&self) -> f64 {
        self.client.y
    }

    #[must_use]
    pub fn client(&self) -> Point {
        self.client
    }

    #[must_use]
    pub fn start(&self) -> Point {
        self.start
    }

    #[must_use]
    pub fn translation_x(&self) -> f64 {
        self.client.x - self.start.x
    }

    #[must_use]
    pub fn translation_y(&self) -> f64 {
        self.client.y - self.start.y
    }

    /// Translation since the touch started.
    #[must_use]
    pub fn translation(&self) -> Point {
        self.client - self.start
    }

    pub(crate) fn move_to(&mut self, client: Point) {
        self.client = client;
    }
}
