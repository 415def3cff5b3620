//! 2D point arithmetic and axis-aligned rectangles.
//!
//! Pure value types with no state; every operation returns a new value.

use serde::{Deserialize, Serialize};

// ── Vector ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(self, other: Vector) -> Vector {
        Vector::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub(self, other: Vector) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y)
    }

    pub fn scale(self, factor: f64) -> Vector {
        Vector::new(self.x * factor, self.y * factor)
    }

    pub fn dot(self, other: Vector) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Unit vector pointing the same way.  A zero-length (or non-finite
    /// length) input yields [`Vector::ZERO`] instead of NaNs.
    pub fn normalize(self) -> Vector {
        let len = self.length();
        if len == 0.0 || !len.is_finite() {
            return Vector::ZERO;
        }
        Vector::new(self.x / len, self.y / len)
    }

    /// Unit heading for a rotation measured clockwise from "up"
    /// (screen y grows downward).
    pub fn from_heading(rotation: f64) -> Vector {
        Vector::new(rotation.sin(), -rotation.cos())
    }
}

// ── Rect ─────────────────────────────────────────────────────────────────────

/// Axis-aligned box anchored at its top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box of the given size whose centre sits on `center`.
    pub fn centered(center: Vector, width: f64, height: f64) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Vector {
        Vector::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict overlap on both axes.  Boxes that only share an edge do not
    /// intersect; the test is symmetric in its arguments.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.max_x()
            && other.x < self.max_x()
            && self.y < other.max_y()
            && other.y < self.max_y()
    }

    pub fn contains(&self, point: Vector) -> bool {
        point.x >= self.x && point.x <= self.max_x() && point.y >= self.y && point.y <= self.max_y()
    }

    /// Grow (or shrink, for a negative margin) every side by `margin`.
    pub fn expanded(&self, margin: f64) -> Rect {
        Rect::new(
            self.x - margin,
            self.y - margin,
            self.width + 2.0 * margin,
            self.height + 2.0 * margin,
        )
    }
}
