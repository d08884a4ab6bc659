//! Settings editing surface.
//!
//! Sensitivity is edited on a friendly 1..=100 scale that maps linearly onto
//! the coefficient actually stored. Every edit is written through to the store
//! immediately, so a running engine picks it up from the change feed.

use super::{ScrollMode, SettingKey, Settings, SettingsStore, StoreError};
use serde_json::Value;
use std::ops::RangeInclusive;
use tracing::warn;

/// A closed numeric interval used for range conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl ValueRange {
    /// Create a range.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    const fn span(self) -> f64 {
        self.max - self.min
    }
}

/// Scale shown to the user for sensitivity.
pub const SENSITIVITY_DISPLAY: ValueRange = ValueRange::new(1.0, 100.0);

/// Coefficient range the display scale maps onto.
pub const SENSITIVITY_ACTUAL: ValueRange = ValueRange::new(0.001, 0.15);

/// Accepted speed caps, in pixels per frame.
pub const MAX_SPEED_RANGE: RangeInclusive<u32> = 1..=500;

/// Map `value` affinely from one range onto another.
#[must_use]
pub fn convert_range(value: f64, from: ValueRange, to: ValueRange) -> f64 {
    let scaled = (value - from.min) / from.span();
    scaled.mul_add(to.span(), to.min)
}

/// Sensitivity coefficient for a display value.
#[must_use]
pub fn display_to_actual_sensitivity(display: u32) -> f64 {
    convert_range(f64::from(display), SENSITIVITY_DISPLAY, SENSITIVITY_ACTUAL)
}

/// Nearest display value for a sensitivity coefficient, clamped to the scale.
#[must_use]
pub fn actual_to_display_sensitivity(actual: f64) -> u32 {
    let display = convert_range(actual, SENSITIVITY_ACTUAL, SENSITIVITY_DISPLAY)
        .round()
        .clamp(SENSITIVITY_DISPLAY.min, SENSITIVITY_DISPLAY.max);
    whole_u32(display)
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "callers round and clamp to a small positive range first"
)]
const fn whole_u32(value: f64) -> u32 {
    value as u32
}

/// The values shown by the settings form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsForm {
    /// Speed cap, in pixels per frame
    pub max_speed: u32,
    /// Sensitivity on the display scale
    pub sensitivity: u32,
    /// Selected mode
    pub mode: ScrollMode,
}

impl Default for SettingsForm {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl SettingsForm {
    /// Populate the form from resolved settings.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        let max_speed = settings.max_scroll_speed.round().clamp(
            f64::from(*MAX_SPEED_RANGE.start()),
            f64::from(*MAX_SPEED_RANGE.end()),
        );
        Self {
            max_speed: whole_u32(max_speed),
            sensitivity: actual_to_display_sensitivity(settings.scroll_sensitivity),
            mode: settings.scroll_mode,
        }
    }

    /// Populate the form from the store, falling back to defaults.
    #[must_use]
    pub fn load<S: SettingsStore + ?Sized>(store: &S) -> Self {
        match store.get() {
            Ok(settings) => Self::from_settings(&settings),
            Err(e) => {
                warn!("Failed to load settings for editing: {}", e);
                Self::default()
            }
        }
    }

    /// Change the speed cap and write it through.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is outside [`MAX_SPEED_RANGE`] or the
    /// store rejects the write.
    pub fn set_max_speed<S: SettingsStore + ?Sized>(
        &mut self,
        store: &mut S,
        value: u32,
    ) -> Result<(), StoreError> {
        if !MAX_SPEED_RANGE.contains(&value) {
            return Err(StoreError::InvalidValue {
                key: SettingKey::MaxScrollSpeed.as_str(),
                reason: format!(
                    "{value} is outside {}..={}",
                    MAX_SPEED_RANGE.start(),
                    MAX_SPEED_RANGE.end()
                ),
            });
        }
        store.set(SettingKey::MaxScrollSpeed, Value::from(value))?;
        self.max_speed = value;
        Ok(())
    }

    /// Change sensitivity from a display value and write the coefficient through.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is off the display scale or the store
    /// rejects the write.
    pub fn set_sensitivity<S: SettingsStore + ?Sized>(
        &mut self,
        store: &mut S,
        display: u32,
    ) -> Result<(), StoreError> {
        let as_float = f64::from(display);
        if as_float < SENSITIVITY_DISPLAY.min || as_float > SENSITIVITY_DISPLAY.max {
            return Err(StoreError::InvalidValue {
                key: SettingKey::ScrollSensitivity.as_str(),
                reason: format!("{display} is outside the 1..=100 scale"),
            });
        }
        let actual = display_to_actual_sensitivity(display);
        store.set(SettingKey::ScrollSensitivity, Value::from(actual))?;
        self.sensitivity = display;
        Ok(())
    }

    /// Change the mode and write it through.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    pub fn set_mode<S: SettingsStore + ?Sized>(
        &mut self,
        store: &mut S,
        mode: ScrollMode,
    ) -> Result<(), StoreError> {
        store.set(SettingKey::ScrollMode, Value::from(mode.label()))?;
        self.mode = mode;
        Ok(())
    }
}
