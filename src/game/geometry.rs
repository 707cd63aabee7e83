use serde::{Deserialize, Serialize};

/// A point (or displacement) in continuous arena coordinates.
///
/// The arena uses screen orientation: `x` grows to the right and `y` grows
/// downward, so a heading of 0° moves along +x and 90° moves along +y.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        self.distance_squared(other).sqrt()
    }

    pub fn distance_squared(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Linear interpolation, `t = 0` yields `self` and `t = 1` yields `other`
    pub fn lerp(&self, other: Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Move position `distance` units along `heading_deg`
    pub fn moved_along(&self, heading_deg: f64, distance: f64) -> Point {
        let (ux, uy) = unit_vector(heading_deg);
        self.moved_by(ux * distance, uy * distance)
    }

    /// Nearest point inside `rect` (identity for points already inside)
    pub fn clamped(&self, rect: Rect) -> Point {
        Point::new(
            self.x.clamp(rect.left, rect.right.max(rect.left)),
            self.y.clamp(rect.top, rect.bottom.max(rect.top)),
        )
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// Axis-aligned rectangle, `left <= right` and `top <= bottom`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Square of half-size `half_extent` around `center`
    pub fn centered(center: Point, half_extent: f64) -> Self {
        Self::new(
            center.x - half_extent,
            center.y - half_extent,
            center.x + half_extent,
            center.y + half_extent,
        )
    }

    /// The arena rectangle `[0, width] x [0, height]`
    pub fn arena(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Shrink every edge inward by `amount`. May produce an empty rectangle.
    pub fn shrunk(&self, amount: f64) -> Self {
        Self::new(
            self.left + amount,
            self.top + amount,
            self.right - amount,
            self.bottom - amount,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.left > self.right || self.top > self.bottom
    }

    pub fn center(&self) -> Point {
        Point::new((self.left + self.right) * 0.5, (self.top + self.bottom) * 0.5)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }
}

/// Normalize an angle in degrees to `(-180, 180]`
pub fn normalize_angle(deg: f64) -> f64 {
    let mut a = deg % 360.0;
    if a <= -180.0 {
        a += 360.0;
    } else if a > 180.0 {
        a -= 360.0;
    }
    a
}

/// Unit vector for a heading in degrees
pub fn unit_vector(heading_deg: f64) -> (f64, f64) {
    let rad = heading_deg.to_radians();
    (rad.cos(), rad.sin())
}

/// Heading in degrees of a direction vector.
///
/// `None` for the zero vector and for vectors with a non-finite component.
pub fn heading_from_vector(dx: f64, dy: f64) -> Option<f64> {
    if !dx.is_finite() || !dy.is_finite() || (dx == 0.0 && dy == 0.0) {
        return None;
    }
    Some(normalize_angle(dy.atan2(dx).to_degrees()))
}
