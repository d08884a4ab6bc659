//! Cursor offset to scroll speed.
//!
//! Speed grows with the 1.25th power of the distance past the dead zone, so
//! small excursions give fine control and large ones scroll fast.

use crate::geometry::{Point, Velocity};
use crate::settings::Settings;

/// Radius around the origin, in pixels, that produces no motion.
pub const DEAD_ZONE: f64 = 5.0;

/// Exponent of the response curve.
pub const RESPONSE_EXPONENT: f64 = 1.25;

/// Speed contributed by one axis for a signed offset from the origin.
///
/// Zero inside the dead zone; otherwise signed like `offset` and never larger
/// than the configured cap in magnitude.
#[must_use]
pub fn axis_velocity(offset: f64, settings: &Settings) -> f64 {
    let distance = offset.abs();
    if distance.is_nan() || distance <= DEAD_ZONE {
        return 0.0;
    }

    let speed = (distance - DEAD_ZONE).powf(RESPONSE_EXPONENT) * settings.scroll_sensitivity;
    if !speed.is_finite() {
        return 0.0;
    }

    // `max` maps a NaN cap to zero, which keeps `clamp` from panicking.
    let cap = settings.max_scroll_speed.max(0.0);
    (offset.signum() * speed).clamp(-cap, cap)
}

/// Velocity for the current cursor position relative to the gesture origin.
#[must_use]
pub fn velocity(origin: Point, cursor: Point, settings: &Settings) -> Velocity {
    let offset = cursor - origin;
    Velocity {
        x: axis_velocity(offset.x, settings),
        y: axis_velocity(offset.y, settings),
    }
}
