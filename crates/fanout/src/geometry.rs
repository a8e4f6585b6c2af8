use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

pub const HALF_TURN: f64 = 180.0;
pub const FULL_TURN: f64 = 360.0;

pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * PI / HALF_TURN
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn square(side: f64) -> Self {
        Self::new(side, side)
    }
}

/// Axis-aligned bounding box, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn square(side: f64) -> Self {
        Self::new(Point::default(), Size::square(side))
    }

    pub fn center(&self) -> Point {
        self.origin
            .offset(self.size.width / 2.0, self.size.height / 2.0)
    }

    pub fn with_center(self, center: Point) -> Self {
        let origin = center.offset(-self.size.width / 2.0, -self.size.height / 2.0);
        Self::new(origin, self.size)
    }

    pub fn with_origin(self, origin: Point) -> Self {
        Self::new(origin, self.size)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.origin.x
            && p.y >= self.origin.y
            && p.x <= self.origin.x + self.size.width
            && p.y <= self.origin.y + self.size.height
    }
}

/// 2D rotation transform, kept in degrees and normalized to `[0, 360)`.
///
/// Half turns compose exactly: two flips land on the same bits they started from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    degrees: f64,
}

impl Rotation {
    pub const IDENTITY: Self = Self { degrees: 0.0 };

    pub fn from_degrees(degrees: f64) -> Self {
        Self {
            degrees: degrees.rem_euclid(FULL_TURN),
        }
    }

    pub fn degrees(&self) -> f64 {
        self.degrees
    }

    pub fn radians(&self) -> f64 {
        degrees_to_radians(self.degrees)
    }

    pub fn rotated(self, by_degrees: f64) -> Self {
        Self::from_degrees(self.degrees + by_degrees)
    }

    pub fn is_upright(&self) -> bool {
        self.degrees == 0.0
    }
}
