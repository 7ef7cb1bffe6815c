//! Host-facing stereo widener plugin.
//!
//! [`StereoWidenerPlugin`] is what a host audio framework drives:
//!
//! 1. [`start`](StereoWidenerPlugin::start) reads the persisted settings and
//!    subscribes to configuration changes.
//! 2. The host calls [`process_int16`](StereoWidenerPlugin::process_int16)
//!    (or hands a [`WidenerProcessor`] to its audio thread) while
//!    [`is_enabled`](StereoWidenerPlugin::is_enabled) is `true`.
//! 3. Configuration edits arrive through
//!    [`on_config_changed`](StereoWidenerPlugin::on_config_changed).
//! 4. [`stop`](StereoWidenerPlugin::stop) unsubscribes.

use std::sync::Arc;

use widener_config::{ConfigBus, ConfigListener, ConfigStore, ENABLE_KEY};
use widener_core::{Coefficients, Narrowing, WidthLaw, WidthUpdate};

use crate::audio::WidenerProcessor;
use crate::settings::{SETTINGS, render_settings};
use crate::shared::WidenerShared;

/// Listener registered on the bus between `start()` and `stop()`.
struct ConfigReload {
    shared: WidenerShared,
}

impl ConfigListener for ConfigReload {
    fn on_config_changed(&self) {
        reload(&self.shared);
    }
}

fn reload(shared: &WidenerShared) {
    if shared.load_config() {
        reset_hook();
    }
}

/// The effect keeps no state between buffers, so there is nothing to clear.
fn reset_hook() {
    tracing::trace!("stereo widener reset");
}

/// Builder for [`StereoWidenerPlugin`].
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use widener_config::{ConfigBus, MemoryStore};
/// use widener_core::{Narrowing, WidthLaw};
/// use widener_plugin::StereoWidenerPlugin;
///
/// let plugin = StereoWidenerPlugin::builder()
///     .law(WidthLaw::Corrective)
///     .narrowing(Narrowing::Saturate)
///     .build(Arc::new(MemoryStore::new()), Arc::new(ConfigBus::new()));
///
/// assert_eq!(plugin.narrowing(), Narrowing::Saturate);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StereoWidenerPluginBuilder {
    law: WidthLaw,
    narrowing: Narrowing,
}

impl StereoWidenerPluginBuilder {
    /// Width law used to derive coefficients.
    pub fn law(mut self, law: WidthLaw) -> Self {
        self.law = law;
        self
    }

    /// Float to `i16` conversion for the 16-bit path.
    pub fn narrowing(mut self, narrowing: Narrowing) -> Self {
        self.narrowing = narrowing;
        self
    }

    /// Build the plugin. Nothing is read from `store` until `start()`.
    pub fn build(self, store: Arc<dyn ConfigStore>, bus: Arc<ConfigBus>) -> StereoWidenerPlugin {
        StereoWidenerPlugin {
            shared: WidenerShared::new(store, self.law, self.narrowing),
            bus,
        }
    }
}

/// Stereo widener as seen by the host.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use widener_config::{ConfigBus, ConfigStore, MemoryStore, WIDTH_KEY};
/// use widener_plugin::StereoWidenerPlugin;
///
/// let store = Arc::new(MemoryStore::new());
/// store.set_float(WIDTH_KEY, 150.0);
///
/// let bus = Arc::new(ConfigBus::new());
/// let plugin = StereoWidenerPlugin::new(store.clone(), bus.clone());
/// plugin.start();
///
/// // Clamped, and the corrected value persisted.
/// assert_eq!(plugin.width_percent(), 100.0);
/// assert_eq!(store.get_float(WIDTH_KEY, 0.0), 100.0);
///
/// let mut frames = [1000i16, 0];
/// plugin.process_int16(&mut frames, 1, 2, 16, 44100);
/// assert_eq!(frames, [700, -300]);
///
/// plugin.stop();
/// assert!(bus.is_empty());
/// ```
pub struct StereoWidenerPlugin {
    shared: WidenerShared,
    bus: Arc<ConfigBus>,
}

impl StereoWidenerPlugin {
    /// Create a plugin with the corrective law and reference narrowing.
    pub fn new(store: Arc<dyn ConfigStore>, bus: Arc<ConfigBus>) -> Self {
        Self::builder().build(store, bus)
    }

    /// Start building a plugin with non-default options.
    pub fn builder() -> StereoWidenerPluginBuilder {
        StereoWidenerPluginBuilder::default()
    }

    /// Read the persisted settings and subscribe to configuration changes.
    ///
    /// Calling `start()` on a running plugin re-reads the settings but does
    /// not subscribe twice.
    pub fn start(&self) {
        // Startup adopts the stored flag without running the reset hook.
        self.shared.load_config();

        if self.shared.subscription().is_none() {
            let listener = Arc::new(ConfigReload {
                shared: self.shared.clone(),
            });
            let id = self.bus.subscribe(listener);
            self.shared.set_subscription(Some(id));
        }

        tracing::info!(
            enabled = self.shared.is_enabled(),
            width = self.shared.width_percent(),
            law = self.shared.law().name(),
            narrowing = self.shared.narrowing().name(),
            "stereo widener started"
        );
    }

    /// Unsubscribe from configuration changes. Safe to call repeatedly.
    pub fn stop(&self) {
        if let Some(id) = self.shared.set_subscription(None) {
            self.bus.unsubscribe(id);
            tracing::info!("stereo widener stopped");
        }
    }

    /// Returns `true` between `start()` and `stop()`.
    pub fn is_running(&self) -> bool {
        self.shared.subscription().is_some()
    }

    /// Re-read both settings and apply them.
    ///
    /// Runs the reset hook when the enable flag switches on. Width rules,
    /// including write-back of a clamped value, apply as in
    /// [`set_width_percent`](Self::set_width_percent).
    pub fn on_config_changed(&self) {
        reload(&self.shared);
    }

    /// Set the width percentage, clamping to \[-100, 100\].
    ///
    /// A clamped value is written back to `stereo_widener.width`.
    pub fn set_width_percent(&self, percent: f32) -> WidthUpdate {
        self.shared.apply_width_percent(percent)
    }

    /// Current width percentage.
    pub fn width_percent(&self) -> f32 {
        self.shared.width_percent()
    }

    /// Enable or disable the effect.
    ///
    /// The flag is persisted only when it changes. Switching on runs the
    /// reset hook.
    pub fn enable(&self, enabled: bool) {
        if enabled == self.shared.is_enabled() {
            return;
        }
        self.shared.store().set_int(ENABLE_KEY, i64::from(enabled));
        if self.shared.set_enabled(enabled) {
            reset_hook();
        }
        tracing::info!(enabled, "stereo widener toggled");
    }

    /// Whether the host should route audio through the effect.
    pub fn is_enabled(&self) -> bool {
        self.shared.is_enabled()
    }

    /// Clear processing state. The widener has none.
    pub fn reset(&self) {
        reset_hook();
    }

    /// Process interleaved signed 16-bit frames in place.
    ///
    /// `bits_per_sample` and `sample_rate` are accepted for host
    /// compatibility and ignored. Returns `frame_count`.
    pub fn process_int16(
        &self,
        samples: &mut [i16],
        frame_count: usize,
        channel_count: usize,
        _bits_per_sample: u32,
        _sample_rate: u32,
    ) -> usize {
        self.processor()
            .process_int16(samples, frame_count, channel_count)
    }

    /// Process interleaved `f32` frames in place.
    ///
    /// `sample_rate` is ignored. Returns `frame_count`.
    pub fn process_f32(
        &self,
        samples: &mut [f32],
        frame_count: usize,
        channel_count: usize,
        _sample_rate: u32,
    ) -> usize {
        self.processor()
            .process_f32(samples, frame_count, channel_count)
    }

    /// Handle for the host's audio thread.
    pub fn processor(&self) -> WidenerProcessor {
        WidenerProcessor::new(self.shared.clone())
    }

    /// Coefficient record currently used for processing.
    pub fn coefficients(&self) -> Coefficients {
        self.shared.coefficients()
    }

    /// Width law in use.
    pub fn law(&self) -> WidthLaw {
        self.shared.law()
    }

    /// Narrowing policy in use.
    pub fn narrowing(&self) -> Narrowing {
        self.shared.narrowing()
    }

    /// Settings panel description.
    pub fn settings_dialog(&self) -> String {
        render_settings(SETTINGS)
    }
}

impl Drop for StereoWidenerPlugin {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for StereoWidenerPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StereoWidenerPlugin")
            .field("shared", &self.shared)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}
