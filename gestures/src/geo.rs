//! Geometry and navigator state shared by the recognizers and the controller.
//!
//! Screen-space values (`Point`) are CSS pixels in client coordinates. Model
//! coordinates (`Vec3`, `Line`) are meters in whatever Cartesian frame the
//! host's globe uses. Geographic values (`Location`) are degrees.

#[cfg(test)]
#[path = "geo_test.rs"]
mod geo_test;

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::consts::{FIELD_OF_VIEW_DEG, MIN_RANGE};

/// A point in screen space (client pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length of this point taken as a vector.
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (self - other).length()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A point or direction in model coordinates (meters).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn dot(self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    #[must_use]
    pub fn scaled(self, factor: f64) -> Vec3 {
        Vec3::new(self.x * factor, self.y * factor, self.z * factor)
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// A ray in model coordinates: `origin + t * direction` for `t >= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Line {
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// The point at parameter `t` along this ray.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Vec3 {
        self.origin + self.direction.scaled(t)
    }
}

/// A geographic location in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Look-at navigator state owned by the rendering host.
///
/// The gesture controller reads and mutates these values; it never creates or
/// destroys the navigator itself. `heading`, `tilt` and `roll` are degrees;
/// `range` is the eye distance from `look_at_location` in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Navigator {
    pub look_at_location: Location,
    pub range: f64,
    pub heading: f64,
    pub tilt: f64,
    pub roll: f64,
    /// Apply the extra range/tilt clamps when the globe is 2D.
    pub enable_2d_limits: bool,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            look_at_location: Location::default(),
            range: 10_000_000.0,
            heading: 0.0,
            tilt: 0.0,
            roll: 0.0,
            enable_2d_limits: true,
        }
    }
}

/// Normalize an angle to `[-180, 180]` degrees.
#[must_use]
pub fn normalized_degrees(degrees: f64) -> f64 {
    let angle = degrees % 360.0;
    if angle > 180.0 {
        angle - 360.0
    } else if angle < -180.0 {
        angle + 360.0
    } else {
        angle
    }
}

/// Normalize a longitude to `[-180, 180]` degrees.
#[must_use]
pub fn normalized_degrees_longitude(degrees: f64) -> f64 {
    normalized_degrees(degrees)
}

/// Clamp a latitude to `[-90, 90]` degrees.
#[must_use]
pub fn clamped_latitude(degrees: f64) -> f64 {
    degrees.clamp(-90.0, 90.0)
}

/// Clamp a navigator range to `[MIN_RANGE, max]`.
#[must_use]
pub fn clamped_range(range: f64, max: f64) -> f64 {
    if range.is_nan() {
        return MIN_RANGE;
    }
    range.clamp(MIN_RANGE, max.max(MIN_RANGE))
}

/// Size in meters of one screen pixel at `distance` meters from the eye.
///
/// Assumes a perspective projection with a horizontal field of view of
/// [`FIELD_OF_VIEW_DEG`]. Returns 0 for an empty viewport.
#[must_use]
pub fn perspective_pixel_size(viewport_width: f64, viewport_height: f64, distance: f64) -> f64 {
    if viewport_width <= 0.0 || viewport_height <= 0.0 {
        return 0.0;
    }
    let tan_half_fov = (FIELD_OF_VIEW_DEG / 2.0).to_radians().tan();
    let frustum_width = 2.0 * distance * tan_half_fov;
    let frustum_height = frustum_width * viewport_height / viewport_width;
    (frustum_width / viewport_width).max(frustum_height / viewport_height)
}
