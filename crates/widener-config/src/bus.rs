//! Change notification for configuration consumers.
//!
//! The host owns a [`ConfigBus`] and calls [`ConfigBus::notify`] after it has
//! changed values in the store. Each subscribed [`ConfigListener`] then
//! re-reads whatever keys it cares about.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

/// Receives "configuration changed" notifications.
pub trait ConfigListener: Send + Sync {
    /// Called after one or more configuration values changed.
    fn on_config_changed(&self);
}

impl<F> ConfigListener for F
where
    F: Fn() + Send + Sync,
{
    fn on_config_changed(&self) {
        self()
    }
}

/// Handle returned by [`ConfigBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registry of configuration listeners.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use widener_config::ConfigBus;
///
/// let bus = ConfigBus::new();
/// let hits = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&hits);
/// let id = bus.subscribe(Arc::new(move || {
///     counter.fetch_add(1, Ordering::Relaxed);
/// }));
///
/// bus.notify();
/// assert!(bus.unsubscribe(id));
/// bus.notify();
/// assert_eq!(hits.load(Ordering::Relaxed), 1);
/// ```
#[derive(Default)]
pub struct ConfigBus {
    next_id: AtomicU64,
    listeners: RwLock<Vec<(SubscriptionId, Arc<dyn ConfigListener>)>>,
}

impl ConfigBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener.
    pub fn subscribe(&self, listener: Arc<dyn ConfigListener>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().push((id, listener));
        id
    }

    /// Remove a listener. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// Call every listener. Returns how many were called.
    ///
    /// Listeners run outside the registry lock, so they may subscribe or
    /// unsubscribe from inside the callback.
    pub fn notify(&self) -> usize {
        let listeners: Vec<Arc<dyn ConfigListener>> = self
            .listeners
            .read()
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();

        tracing::trace!(count = listeners.len(), "notifying config listeners");
        for listener in &listeners {
            listener.on_config_changed();
        }
        listeners.len()
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.read().len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.read().is_empty()
    }
}

impl std::fmt::Debug for ConfigBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigBus")
            .field("listeners", &self.len())
            .finish()
    }
}
