//! Fractional scroll carried between frames.

use crate::geometry::{ScrollDelta, Velocity};

/// Per-axis sub-pixel remainder.
///
/// Each frame adds its velocity, the whole-pixel part is applied, and only
/// that part is subtracted back out. What stays behind is always the
/// truncation remainder, so the total scrolled never drifts more than a pixel
/// from the total requested.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Accumulator {
    x: f64,
    y: f64,
}

impl Accumulator {
    /// Add one frame of velocity.
    pub fn add(&mut self, velocity: Velocity) {
        self.x += velocity.x;
        self.y += velocity.y;
    }

    /// Whole pixels ready to apply, truncated toward zero.
    #[must_use]
    pub fn whole(&self) -> ScrollDelta {
        ScrollDelta::new(truncate(self.x), truncate(self.y))
    }

    /// Remove an applied delta.
    pub fn commit(&mut self, applied: ScrollDelta) {
        self.x -= f64::from(applied.dx);
        self.y -= f64::from(applied.dy);
    }

    /// Current remainder on each axis.
    #[must_use]
    pub const fn remainder(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Drop any remainder.
    pub const fn reset(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "value is truncated toward zero first and the cast saturates"
)]
fn truncate(value: f64) -> i32 {
    value.trunc() as i32
}
