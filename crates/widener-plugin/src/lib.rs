//! Stereo widener plugin for in-process audio hosts.
//!
//! Glue between a host audio framework and the widener transform:
//!
//! - [`StereoWidenerPlugin`] - Lifecycle (`start`/`stop`), enable state,
//!   configuration reload and the processing entry points
//! - [`WidenerProcessor`] - Lock-free handle for the host's audio thread
//! - [`WidenerShared`] - State shared between control and audio threads
//! - [`settings`] - Declarative settings panel description
//!
//! Settings persist through a [`widener_config::ConfigStore`] under
//! `stereo_widener.enable` and `stereo_widener.width`. The host announces
//! edits on a [`widener_config::ConfigBus`]; a started plugin re-reads both
//! values on every notification.
//!
//! # Threading
//!
//! Control calls (`start`, `enable`, `set_width_percent`, configuration
//! notifications) may come from any thread. Each width change publishes a
//! complete [`widener_core::Coefficients`] record through an atomic pointer
//! swap. The audio path loads that record once per buffer without locking.

pub mod audio;
pub mod plugin;
pub mod settings;
pub mod shared;

pub use audio::WidenerProcessor;
pub use plugin::{StereoWidenerPlugin, StereoWidenerPluginBuilder};
pub use settings::{PropertyKind, SETTINGS, SettingsProperty, render_settings};
pub use shared::WidenerShared;

/// Plugin identifier registered with the host.
pub const PLUGIN_ID: &str = "stereo_widener";

/// Display name.
pub const PLUGIN_NAME: &str = "Stereo widener";

/// One-line description.
pub const PLUGIN_DESCRIPTION: &str = "Stereo widener plugin";

/// Plugin version, from the crate manifest.
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");
