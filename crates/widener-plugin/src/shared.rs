//! Thread-safe shared state for the stereo widener.
//!
//! `WidenerShared` lives for the lifetime of the plugin instance and is
//! reachable from the control thread (lifecycle, configuration callbacks,
//! enable/disable) and the audio thread (processing).
//!
//! The current [`Coefficients`] record is published through an `ArcSwap`.
//! Updates run the parameter model under a mutex and swap in a complete new
//! record, so the audio thread does one wait-free load per buffer and never
//! sees weights from two different widths.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use widener_config::{
    ConfigStore, DEFAULT_ENABLE, DEFAULT_WIDTH, ENABLE_KEY, SubscriptionId, WIDTH_KEY,
};
use widener_core::{Coefficients, Narrowing, WidthLaw, WidthModel, WidthUpdate};

/// Inner storage behind `Arc` so `WidenerShared` can be cheaply cloned.
struct WidenerSharedData {
    /// Coefficients read by the audio thread.
    coefficients: ArcSwap<Coefficients>,
    /// Width percentage and the record it produced. Control path only.
    model: Mutex<WidthModel>,
    /// Mirrors `stereo_widener.enable`.
    enabled: AtomicBool,
    /// Float to `i16` conversion used by the 16-bit path.
    narrowing: Narrowing,
    /// Persisted configuration.
    store: Arc<dyn ConfigStore>,
    /// Set between `start()` and `stop()`.
    subscription: Mutex<Option<SubscriptionId>>,
}

/// Shared state accessible from all plugin threads.
#[derive(Clone)]
pub struct WidenerShared {
    inner: Arc<WidenerSharedData>,
}

impl WidenerShared {
    /// Create shared state at bypass width, disabled.
    ///
    /// Nothing is read from `store` until [`load_config`](Self::load_config).
    pub fn new(store: Arc<dyn ConfigStore>, law: WidthLaw, narrowing: Narrowing) -> Self {
        let model = WidthModel::new(law);
        Self {
            inner: Arc::new(WidenerSharedData {
                coefficients: ArcSwap::from_pointee(model.coefficients()),
                model: Mutex::new(model),
                enabled: AtomicBool::new(false),
                narrowing,
                store,
                subscription: Mutex::new(None),
            }),
        }
    }

    /// Current coefficient record (wait-free).
    #[inline]
    pub fn coefficients(&self) -> Coefficients {
        **self.inner.coefficients.load()
    }

    /// Narrowing policy for the 16-bit path.
    pub fn narrowing(&self) -> Narrowing {
        self.inner.narrowing
    }

    /// Width law used for coefficient derivation.
    pub fn law(&self) -> WidthLaw {
        self.inner.model.lock().law()
    }

    /// Current width percentage.
    pub fn width_percent(&self) -> f32 {
        self.inner.model.lock().width_percent()
    }

    /// Backing configuration store.
    pub fn store(&self) -> &Arc<dyn ConfigStore> {
        &self.inner.store
    }

    /// Apply a width percentage.
    ///
    /// Out-of-range values are clamped and the clamped value is written back
    /// to `stereo_widener.width`. A new coefficient record is published only
    /// when the normalized width changes.
    pub fn apply_width_percent(&self, percent: f32) -> WidthUpdate {
        let update = {
            let mut model = self.inner.model.lock();
            let update = model.set_width_percent(percent);
            if update.changed {
                let coeffs = model.coefficients();
                self.inner.coefficients.store(Arc::new(coeffs));
                tracing::debug!(
                    width = coeffs.width,
                    mid_amp = coeffs.mid_amp,
                    side_amp = coeffs.side_amp,
                    "published widener coefficients"
                );
            }
            update
        };

        if update.corrected {
            tracing::warn!(
                requested = percent,
                stored = update.percent,
                "width out of range, writing corrected value"
            );
            self.inner.store.set_float(WIDTH_KEY, update.percent);
        }
        update
    }

    /// Whether the effect is enabled.
    pub fn is_enabled(&self) -> bool {
        self.inner.enabled.load(Ordering::Acquire)
    }

    /// Set the enabled flag.
    ///
    /// Returns `true` on a disabled to enabled transition.
    pub fn set_enabled(&self, enabled: bool) -> bool {
        let was = self.inner.enabled.swap(enabled, Ordering::AcqRel);
        enabled && !was
    }

    /// Read both configuration keys and apply them.
    ///
    /// Returns `true` if the enable flag went from off to on.
    pub fn load_config(&self) -> bool {
        let enabled = self.inner.store.get_int(ENABLE_KEY, DEFAULT_ENABLE) != 0;
        let width = self.inner.store.get_float(WIDTH_KEY, DEFAULT_WIDTH);

        let switched_on = self.set_enabled(enabled);
        self.apply_width_percent(width);
        switched_on
    }

    /// Store the bus subscription, returning any previous one.
    pub fn set_subscription(&self, id: Option<SubscriptionId>) -> Option<SubscriptionId> {
        std::mem::replace(&mut *self.inner.subscription.lock(), id)
    }

    /// Current bus subscription.
    pub fn subscription(&self) -> Option<SubscriptionId> {
        *self.inner.subscription.lock()
    }
}

impl std::fmt::Debug for WidenerShared {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidenerShared")
            .field("coefficients", &self.coefficients())
            .field("enabled", &self.is_enabled())
            .field("narrowing", &self.inner.narrowing)
            .finish_non_exhaustive()
    }
}
