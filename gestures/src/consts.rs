//! Shared numeric constants for the gestures crate.

// ── Translation smoothing ───────────────────────────────────────

/// Weight of the newest sample in the exponential translation filter.
pub const TRANSLATION_WEIGHT: f64 = 0.4;

// ── Recognizer thresholds ───────────────────────────────────────

/// Mouse movement in pixels before a drag is interpreted.
pub const DRAG_INTERPRET_DISTANCE_PX: f64 = 5.0;

/// Movement in pixels before a pan (or tilt) is interpreted.
pub const PAN_INTERPRET_DISTANCE_PX: f64 = 20.0;

/// Change in finger distance before a pinch recognizes.
pub const PINCH_THRESHOLD_PX: f64 = 20.0;

/// Change in finger angle (degrees) before a rotation recognizes.
pub const ROTATION_THRESHOLD_DEG: f64 = 20.0;

/// Largest finger separation for a multi-finger tilt.
pub const TILT_MAX_TOUCH_DISTANCE_PX: f64 = 250.0;

/// Largest relative finger drift for a multi-finger tilt.
pub const TILT_MAX_TOUCH_DIVERGENCE_PX: f64 = 50.0;

// ── Click ───────────────────────────────────────────────────────

/// Cumulative pointer drift that fails a pending click.
pub const CLICK_MAX_MOVEMENT_PX: f64 = 5.0;

/// Longest a button may stay down for one click, in milliseconds.
pub const CLICK_MAX_DURATION_MS: f64 = 500.0;

/// Longest gap between consecutive clicks, in milliseconds.
pub const CLICK_MAX_INTERVAL_MS: f64 = 400.0;

// ── Navigation ──────────────────────────────────────────────────

/// Horizontal field of view assumed when converting pixels to meters.
pub const FIELD_OF_VIEW_DEG: f64 = 45.0;

/// Pixels per wheel "line" in `DOM_DELTA_LINE` mode.
pub const WHEEL_LINE_PX: f64 = 40.0;

/// Pixels per wheel "page" in `DOM_DELTA_PAGE` mode.
pub const WHEEL_PAGE_PX: f64 = 400.0;

/// Divisor turning a normalized wheel delta into a fractional zoom step.
pub const WHEEL_ZOOM_DIVISOR: f64 = 1000.0;

/// Smallest navigator range; keeps the eye off the look-at point.
pub const MIN_RANGE: f64 = 1.0;
