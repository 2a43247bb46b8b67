// src/geometry.rs

// Pure planar geometry shared by the tracker, the reconciler, and the
// simulated movement source. The frame is the map's pixel frame: x grows
// rightward, y grows downward, so screen "north" is toward decreasing y.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// A point in the local planar map frame (map pixels / meters-equivalent).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Horizontal component, growing rightward
    pub x: f64,
    /// Vertical component, growing downward
    pub y: f64,
}

impl Coordinate {
    /// Creates a coordinate from its components.
    pub const fn new(x: f64, y: f64) -> Self {
        Coordinate { x, y }
    }

    /// True when both components are finite numbers. Route responses are
    /// filtered through this before they reach the tracker.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Vector2<f64>> for Coordinate {
    fn from(v: Vector2<f64>) -> Self {
        Coordinate::new(v.x, v.y)
    }
}

fn delta(from: Coordinate, to: Coordinate) -> Vector2<f64> {
    Vector2::new(to.x - from.x, to.y - from.y)
}

/// Euclidean distance between two points.
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    delta(a, b).norm()
}

/// Screen bearing in degrees from `from` to `to`.
///
/// 0° points toward decreasing y ("up" on screen), 90° toward increasing x.
/// Consumed only by the arrow overlay.
pub fn bearing(from: Coordinate, to: Coordinate) -> f64 {
    (to.x - from.x).atan2(from.y - to.y).to_degrees()
}

/// Moves `current` toward `target` by at most `step`.
///
/// Returns `target` exactly once it is within `step`; the result never
/// overshoots and always lies on the segment between the two points.
pub fn move_toward(current: Coordinate, target: Coordinate, step: f64) -> Coordinate {
    let d = delta(current, target);
    let length = d.norm();
    if length <= step {
        return target;
    }
    Coordinate::from(Vector2::new(current.x, current.y) + d * (step / length))
}
