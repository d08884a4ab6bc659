//! Points, velocities and integer scroll deltas in viewport coordinates.

use std::ops::Sub;

/// A position in CSS pixels relative to the viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Create a point from its coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Shift the point by the given amounts.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Per-axis scroll speed in pixels per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity {
    /// Horizontal speed (positive scrolls right)
    pub x: f64,
    /// Vertical speed (positive scrolls down)
    pub y: f64,
}

impl Velocity {
    /// Whether neither axis contributes any motion.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Whole-pixel scroll amount applied to a target in one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ScrollDelta {
    /// Horizontal pixels
    pub dx: i32,
    /// Vertical pixels
    pub dy: i32,
}

impl ScrollDelta {
    /// Create a delta from its components.
    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Whether applying this delta would be a no-op.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

/// An axis-aligned rectangle, used for hit testing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from its origin and size.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the point falls inside the rectangle (right/bottom edges exclusive).
    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        let within_x = point.x >= self.x && point.x < self.x + self.width;
        let within_y = point.y >= self.y && point.y < self.y + self.height;
        within_x && within_y
    }
}
