//! Simulated world window for replaying input without a renderer.
//!
//! DESIGN
//! ======
//! The simulated view always looks straight down at the navigator's look-at
//! location, rotated by its heading; tilt and roll are tracked but do not
//! change the picture. That is enough for the controller's ground-point
//! pan math, which only needs consistent screen rays. The 3D globe is a
//! sphere in the usual model frame (`+y` north pole, `+z` through latitude 0
//! longitude 0, `+x` through longitude 90 E). The 2D globe is an
//! equirectangular plane at `z = 0` measured in meters.

#[cfg(test)]
#[path = "window_test.rs"]
mod window_test;

use gestures::controller::{Globe, WorldWindow};
use gestures::geo::{Line, Location, Navigator, Point, Vec3, perspective_pixel_size};

/// WGS84 equatorial radius in meters.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

// =============================================================================
// GLOBE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedGlobe {
    is_2d: bool,
    radius: f64,
}

impl SimulatedGlobe {
    #[must_use]
    pub fn new(is_2d: bool) -> Self {
        Self { is_2d, radius: EARTH_RADIUS }
    }

    /// Model coordinates of a location on the surface.
    #[must_use]
    pub fn point_at(&self, location: Location) -> Vec3 {
        let lat = location.latitude.to_radians();
        let lon = location.longitude.to_radians();
        if self.is_2d {
            return Vec3::new(lon * self.radius, lat * self.radius, 0.0);
        }
        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_lon, cos_lon) = lon.sin_cos();
        Vec3::new(self.radius * cos_lat * sin_lon, self.radius * sin_lat, self.radius * cos_lat * cos_lon)
    }

    /// Local `(east, north, up)` unit vectors at `location`.
    fn surface_frame(&self, location: Location) -> (Vec3, Vec3, Vec3) {
        if self.is_2d {
            return (Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        }
        let (sin_lat, cos_lat) = location.latitude.to_radians().sin_cos();
        let (sin_lon, cos_lon) = location.longitude.to_radians().sin_cos();
        let east = Vec3::new(cos_lon, 0.0, -sin_lon);
        let north = Vec3::new(-sin_lat * sin_lon, cos_lat, -sin_lat * cos_lon);
        let up = Vec3::new(cos_lat * sin_lon, sin_lat, cos_lat * cos_lon);
        (east, north, up)
    }
}

impl Globe for SimulatedGlobe {
    fn is_2d(&self) -> bool {
        self.is_2d
    }

    fn equatorial_radius(&self) -> f64 {
        self.radius
    }

    fn polar_radius(&self) -> f64 {
        self.radius
    }

    fn intersects_line(&self, line: &Line) -> Option<Vec3> {
        if self.is_2d {
            if line.direction.z.abs() < f64::EPSILON {
                return None;
            }
            let t = -line.origin.z / line.direction.z;
            return (t >= 0.0).then(|| line.point_at(t));
        }

        // |o + t d|^2 = r^2, nearest non-negative root.
        let a = line.direction.dot(line.direction);
        let b = 2.0 * line.origin.dot(line.direction);
        let c = line.origin.dot(line.origin) - self.radius * self.radius;
        let discriminant = b * b - 4.0 * a * c;
        if a <= 0.0 || discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        let near = (-b - root) / (2.0 * a);
        let far = (-b + root) / (2.0 * a);
        let t = if near >= 0.0 { near } else { far };
        (t >= 0.0).then(|| line.point_at(t))
    }

    fn compute_position_from_point(&self, point: Vec3) -> Location {
        if self.is_2d {
            return Location::new((point.y / self.radius).to_degrees(), (point.x / self.radius).to_degrees());
        }
        let length = point.length();
        if length <= 0.0 {
            return Location::default();
        }
        let latitude = (point.y / length).clamp(-1.0, 1.0).asin().to_degrees();
        let longitude = point.x.atan2(point.z).to_degrees();
        Location::new(latitude, longitude)
    }
}

// =============================================================================
// WINDOW
// =============================================================================

#[derive(Debug, Clone)]
pub struct SimulatedWindow {
    globe: SimulatedGlobe,
    navigator: Navigator,
    width: f64,
    height: f64,
    frames: u64,
}

impl SimulatedWindow {
    #[must_use]
    pub fn new(globe: SimulatedGlobe, navigator: Navigator, width: f64, height: f64) -> Self {
        Self { globe, navigator, width, height, frames: 0 }
    }

    /// Redraw requests received so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl WorldWindow for SimulatedWindow {
    fn globe(&self) -> &dyn Globe {
        &self.globe
    }

    fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    fn navigator_mut(&mut self) -> &mut Navigator {
        &mut self.navigator
    }

    fn canvas_size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn canvas_coordinates(&self, client_x: f64, client_y: f64) -> Point {
        Point::new(client_x, client_y)
    }

    fn ray_through_screen_point(&self, point: Point) -> Option<Line> {
        let range = self.navigator.range;
        let pixel = perspective_pixel_size(self.width, self.height, range);
        if pixel <= 0.0 {
            return None;
        }
        let look_at = self.navigator.look_at_location;
        let center = self.globe.point_at(look_at);
        let (east, north, up) = self.globe.surface_frame(look_at);

        let (sin_heading, cos_heading) = self.navigator.heading.to_radians().sin_cos();
        let right = east.scaled(cos_heading) - north.scaled(sin_heading);
        let forward = east.scaled(sin_heading) + north.scaled(cos_heading);

        let dx = (point.x - self.width / 2.0) * pixel;
        let dy = (self.height / 2.0 - point.y) * pixel;
        let eye = center + up.scaled(range);
        let target = center + right.scaled(dx) + forward.scaled(dy);
        Some(Line::new(eye, target - eye))
    }

    fn redraw(&mut self) {
        self.frames += 1;
    }
}
