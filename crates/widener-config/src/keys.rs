//! Configuration keys owned by the stereo widener.

/// Enable flag. Stored as an integer, `0` = off, anything else = on.
pub const ENABLE_KEY: &str = "stereo_widener.enable";

/// Effect strength in percent. Legal range is `[-100, 100]`.
pub const WIDTH_KEY: &str = "stereo_widener.width";

/// Value of [`ENABLE_KEY`] when unset.
pub const DEFAULT_ENABLE: i64 = 0;

/// Value of [`WIDTH_KEY`] when unset.
pub const DEFAULT_WIDTH: f32 = 0.0;
