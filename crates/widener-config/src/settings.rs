//! Typed view of the widener's configuration section.
//!
//! ```toml
//! [stereo_widener]
//! enable = 1
//! width = 35.0
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::keys::{DEFAULT_ENABLE, DEFAULT_WIDTH, ENABLE_KEY, WIDTH_KEY};
use crate::store::ConfigStore;

/// Persisted widener settings.
///
/// Values are stored as read. Range checks belong to the effect, which
/// writes corrected values back through the store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidenerSettings {
    /// Raw enable flag; any non-zero value enables the effect.
    pub enable: i64,
    /// Width in percent.
    pub width: f32,
}

impl Default for WidenerSettings {
    fn default() -> Self {
        Self {
            enable: DEFAULT_ENABLE,
            width: DEFAULT_WIDTH,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    stereo_widener: WidenerSettings,
}

impl WidenerSettings {
    /// Returns `true` if the enable flag is set.
    pub fn is_enabled(&self) -> bool {
        self.enable != 0
    }

    /// Read both keys from a store, falling back to defaults.
    pub fn load(store: &dyn ConfigStore) -> Self {
        Self {
            enable: store.get_int(ENABLE_KEY, DEFAULT_ENABLE),
            width: store.get_float(WIDTH_KEY, DEFAULT_WIDTH),
        }
    }

    /// Write both keys to a store.
    pub fn save(&self, store: &dyn ConfigStore) {
        store.set_int(ENABLE_KEY, self.enable);
        store.set_float(WIDTH_KEY, self.width);
    }

    /// Parse the `[stereo_widener]` section of a configuration document.
    ///
    /// A missing section or missing fields take their defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let file: SettingsFile = toml::from_str(toml_str)?;
        Ok(file.stereo_widener)
    }

    /// Render the settings as a `[stereo_widener]` document.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(&SettingsFile {
            stereo_widener: *self,
        })?)
    }
}
