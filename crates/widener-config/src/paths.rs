//! Platform-specific paths for the widener configuration file.
//!
//! - **User config**: `~/.config/stereo-widener/` (Linux),
//!   `~/Library/Application Support/stereo-widener/` (macOS),
//!   `%APPDATA%\stereo-widener\` (Windows)
//!
//! # Example
//!
//! ```rust,no_run
//! use widener_config::paths;
//!
//! let path = paths::default_config_path();
//! println!("Config file: {:?}", path);
//! ```

use std::fs;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Application name used for directory paths.
pub const APP_NAME: &str = "stereo-widener";

/// File name of the configuration inside [`user_config_dir`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the path of the user configuration file.
pub fn default_config_path() -> PathBuf {
    user_config_dir().join(CONFIG_FILE_NAME)
}

/// Ensure the user config directory exists, creating it if necessary.
pub fn ensure_user_config_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_config_dir();
    ensure_dir(&dir)?;
    Ok(dir)
}

pub(crate) fn ensure_dir(dir: &std::path::Path) -> Result<(), ConfigError> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| ConfigError::create_dir(dir, e))?;
    }
    Ok(())
}
