use crate::geometry::{FULL_TURN, Point, degrees_to_radians};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DISTANCE: f64 = 100.0;
pub const DEFAULT_ARC_FRACTION: f64 = 0.5; // half circle
pub const DEFAULT_ROTATION_OFFSET: f64 = 0.5; // arc opens above the main button
pub const DEFAULT_DURATION: f64 = 0.8; // seconds, show and hide alike

/// Where the sub-buttons land and how long they take to get there.
///
/// `arc_fraction` and `rotation_offset` are fractions of a full circle. Values
/// outside `[0, 1]` are accepted and simply wrap past a full turn; keeping them
/// in range is up to the caller. A negative `distance` is clamped to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcLayout {
    pub distance: f64,
    pub arc_fraction: f64,
    pub rotation_offset: f64,
    pub duration: f64,
}

impl Default for ArcLayout {
    fn default() -> Self {
        Self {
            distance: DEFAULT_DISTANCE,
            arc_fraction: DEFAULT_ARC_FRACTION,
            rotation_offset: DEFAULT_ROTATION_OFFSET,
            duration: DEFAULT_DURATION,
        }
    }
}

impl ArcLayout {
    /// Angle of the `index`-th of `count` buttons, in degrees.
    ///
    /// Buttons are spread evenly from the start of the arc to its end, so the
    /// first sits at `-360 * rotation_offset` and the last `arc_fraction` of a
    /// turn further on. A single button has no spread and sits at the start.
    pub fn angle_degrees(&self, index: usize, count: usize) -> f64 {
        let sweep = self.arc_fraction * FULL_TURN;
        let fraction = if count > 1 {
            index as f64 / (count - 1) as f64
        } else {
            0.0
        };
        fraction * sweep - FULL_TURN * self.rotation_offset
    }

    pub fn clamped_distance(&self) -> f64 {
        self.distance.max(0.0)
    }

    pub fn clamped_duration(&self) -> f64 {
        self.duration.max(0.0)
    }

    /// Displacement from a button's resting frame origin to its arc position.
    pub fn offset(&self, index: usize, count: usize) -> (f64, f64) {
        let angle = degrees_to_radians(self.angle_degrees(index, count));
        let distance = self.clamped_distance();
        (distance * angle.cos(), distance * angle.sin())
    }

    pub fn target_origin(&self, origin: Point, index: usize, count: usize) -> Point {
        let (dx, dy) = self.offset(index, count);
        origin.offset(dx, dy)
    }
}
