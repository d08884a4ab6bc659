//! User preferences for autoscrolling
//!
//! Three values are persisted: the speed cap, the sensitivity coefficient of
//! the response curve and the activation mode. The engine keeps its own copy
//! and patches it from change notices published by the store.

pub mod editor;
mod store;

pub use store::{
    ChangeFeed, ChangeNotice, JsonFileStore, MemoryStore, SettingsStore, StorageArea,
    StorageChange, StoreError,
};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Default speed cap, in pixels per frame.
pub const DEFAULT_MAX_SCROLL_SPEED: f64 = 100.0;

/// Default sensitivity coefficient applied to the response curve.
pub const DEFAULT_SCROLL_SENSITIVITY: f64 = 0.04;

/// How a gesture is started and stopped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollMode {
    /// A middle click starts scrolling; a later click or Escape stops it.
    #[default]
    Toggle,
    /// Scrolling lasts only while the middle button is held.
    Drag,
}

impl ScrollMode {
    /// All modes, in display order.
    pub const ALL: &'static [Self] = &[Self::Toggle, Self::Drag];

    /// Lowercase label, identical to the stored value.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Toggle => "toggle",
            Self::Drag => "drag",
        }
    }
}

impl fmt::Display for ScrollMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ScrollMode {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|mode| mode.label() == s)
            .ok_or_else(|| StoreError::InvalidValue {
                key: SettingKey::ScrollMode.as_str(),
                reason: format!("unknown mode {s:?}"),
            })
    }
}

/// The keys the engine understands. Anything else in the store is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    /// `maxScrollSpeed`
    MaxScrollSpeed,
    /// `scrollSensitivity`
    ScrollSensitivity,
    /// `scrollMode`
    ScrollMode,
}

impl SettingKey {
    /// Every recognized key.
    pub const ALL: &'static [Self] = &[
        Self::MaxScrollSpeed,
        Self::ScrollSensitivity,
        Self::ScrollMode,
    ];

    /// Storage key name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MaxScrollSpeed => "maxScrollSpeed",
            Self::ScrollSensitivity => "scrollSensitivity",
            Self::ScrollMode => "scrollMode",
        }
    }

    /// Look up a key by its storage name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|key| key.as_str() == name)
    }
}

/// Autoscroll preferences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Upper bound on per-axis speed, in pixels per frame
    #[serde(default = "default_max_scroll_speed")]
    pub max_scroll_speed: f64,

    /// Coefficient applied after the power curve
    #[serde(default = "default_scroll_sensitivity")]
    pub scroll_sensitivity: f64,

    /// Activation mode
    #[serde(default)]
    pub scroll_mode: ScrollMode,
}

const fn default_max_scroll_speed() -> f64 {
    DEFAULT_MAX_SCROLL_SPEED
}

const fn default_scroll_sensitivity() -> f64 {
    DEFAULT_SCROLL_SENSITIVITY
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_scroll_speed: default_max_scroll_speed(),
            scroll_sensitivity: default_scroll_sensitivity(),
            scroll_mode: ScrollMode::default(),
        }
    }
}

impl Settings {
    /// Build settings from raw stored values, laid over the defaults.
    ///
    /// Unknown keys are skipped. A recognized key holding an unusable value
    /// keeps its default and is logged.
    #[must_use]
    pub fn from_stored(stored: &serde_json::Map<String, Value>) -> Self {
        let mut settings = Self::default();
        for key in SettingKey::ALL {
            if let Some(value) = stored.get(key.as_str())
                && let Err(e) = settings.set_value(*key, value)
            {
                warn!("Ignoring stored setting: {}", e);
            }
        }
        settings
    }

    /// Replace one value, validating it first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidValue`] if the value has the wrong type,
    /// is not a positive finite number, or names an unknown mode.
    pub fn set_value(&mut self, key: SettingKey, value: &Value) -> Result<(), StoreError> {
        match key {
            SettingKey::MaxScrollSpeed => self.max_scroll_speed = positive_number(key, value)?,
            SettingKey::ScrollSensitivity => {
                self.scroll_sensitivity = positive_number(key, value)?;
            }
            SettingKey::ScrollMode => {
                let name = value.as_str().ok_or_else(|| StoreError::InvalidValue {
                    key: key.as_str(),
                    reason: format!("expected a string, got {value}"),
                })?;
                self.scroll_mode = name.parse()?;
            }
        }
        Ok(())
    }

    /// Read one value back as it would be stored.
    #[must_use]
    pub fn value(&self, key: SettingKey) -> Value {
        match key {
            SettingKey::MaxScrollSpeed => Value::from(self.max_scroll_speed),
            SettingKey::ScrollSensitivity => Value::from(self.scroll_sensitivity),
            SettingKey::ScrollMode => Value::from(self.scroll_mode.label()),
        }
    }

    /// Merge a change notice into the cached copy.
    ///
    /// Only the `sync` area is honored. Unknown keys, changes without a new
    /// value, and invalid values are skipped. Returns how many keys changed.
    pub fn apply_changes(&mut self, notice: &ChangeNotice) -> usize {
        if notice.area != StorageArea::Sync {
            return 0;
        }

        let mut applied = 0;
        for (name, change) in &notice.changes {
            let Some(key) = SettingKey::from_name(name) else {
                continue;
            };
            let Some(value) = change.new_value.as_ref() else {
                continue;
            };
            match self.set_value(key, value) {
                Ok(()) => {
                    debug!("Setting {} updated to {}", name, value);
                    applied += 1;
                }
                Err(e) => warn!("Ignoring settings change: {}", e),
            }
        }
        applied
    }
}

fn positive_number(key: SettingKey, value: &Value) -> Result<f64, StoreError> {
    match value.as_f64() {
        Some(n) if n.is_finite() && n > 0.0 => Ok(n),
        _ => Err(StoreError::InvalidValue {
            key: key.as_str(),
            reason: format!("expected a positive number, got {value}"),
        }),
    }
}
