//! Configuration for the stereo widener.
//!
//! This crate persists the widener's two settings and tells interested
//! parties when they change:
//!
//! - [`ConfigStore`] - Numeric get/set by dotted key, with type coercion
//! - [`MemoryStore`] / [`FileStore`] - TOML-backed stores, in memory or on disk
//! - [`ConfigBus`] - "Configuration changed" notification fan-out
//! - [`WidenerSettings`] - Typed `[stereo_widener]` section
//! - [`paths`] - Platform-specific location of the user config file
//!
//! # Example
//!
//! ```rust
//! use widener_config::{ConfigStore, MemoryStore, WidenerSettings, ENABLE_KEY, WIDTH_KEY};
//!
//! let store = MemoryStore::from_toml("[stereo_widener]\nenable = 1\nwidth = 30.0\n")?;
//! assert_eq!(store.get_int(ENABLE_KEY, 0), 1);
//! assert_eq!(store.get_float(WIDTH_KEY, 0.0), 30.0);
//!
//! let settings = WidenerSettings::load(&store);
//! assert!(settings.is_enabled());
//! # Ok::<(), widener_config::ConfigError>(())
//! ```

pub mod bus;
pub mod error;
pub mod file_store;
pub mod keys;
pub mod paths;
pub mod settings;
pub mod store;

pub use bus::{ConfigBus, ConfigListener, SubscriptionId};
pub use error::ConfigError;
pub use file_store::FileStore;
pub use keys::{DEFAULT_ENABLE, DEFAULT_WIDTH, ENABLE_KEY, WIDTH_KEY};
pub use paths::{default_config_path, ensure_user_config_dir, user_config_dir};
pub use settings::WidenerSettings;
pub use store::{ConfigStore, MemoryStore};
