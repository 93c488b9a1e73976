//! Client context handed to integrations during setup.

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::event::Event;
use crate::index::IntegrationIndex;
use crate::integration::{Integration, IntegrationRef};
use crate::processor::EventProcessors;

/// Process-wide hub.
static GLOBAL_HUB: Lazy<Arc<Hub>> = Lazy::new(|| Arc::new(Hub::new(EventProcessors::global())));

/// Client context: the integrations bound to the active client and the
/// processor pipeline events are captured through.
pub struct Hub {
    integrations: RwLock<IntegrationIndex>,
    processors: Arc<EventProcessors>,
}

impl Hub {
    /// Create a hub with no bound integrations.
    pub fn new(processors: Arc<EventProcessors>) -> Self {
        Self {
            integrations: RwLock::new(IntegrationIndex::new()),
            processors,
        }
    }

    /// Get the process-wide hub.
    pub fn global() -> Arc<Hub> {
        GLOBAL_HUB.clone()
    }

    /// Replace the integrations bound to this hub.
    pub fn bind_integrations(&self, index: IntegrationIndex) {
        tracing::debug!("Binding {} integrations to hub", index.len());
        *self.integrations.write() = index;
    }

    /// Get a bound integration by name.
    pub fn get_integration(&self, name: &str) -> Option<IntegrationRef> {
        self.integrations.read().get(name).cloned()
    }

    /// Run `f` against a bound integration of concrete type `T`.
    ///
    /// Returns `None` when the name is not bound or is bound to another type.
    /// The lock is released before `f` runs, so `f` may rebind the hub.
    pub fn with_integration<T, R>(&self, name: &str, f: impl FnOnce(&T) -> R) -> Option<R>
    where
        T: Integration + 'static,
    {
        let integration = self.get_integration(name)?;
        integration.as_any().downcast_ref::<T>().map(f)
    }

    /// Whether an integration with this name is bound.
    pub fn has_integration(&self, name: &str) -> bool {
        self.integrations.read().contains(name)
    }

    /// Names of the bound integrations.
    pub fn integration_names(&self) -> Vec<String> {
        self.integrations.read().names()
    }

    /// Run an event through the processor pipeline.
    pub fn process_event(&self, event: Event) -> Option<Event> {
        self.processors.apply(event)
    }

    /// The processor pipeline of this hub.
    pub fn processors(&self) -> &Arc<EventProcessors> {
        &self.processors
    }
}

/// Accessor for the current hub, passed to `setup_once`.
///
/// Integrations keep a clone and resolve the hub lazily, so they observe the
/// client that is current when an event is processed rather than the one
/// current at setup time.
#[derive(Clone)]
pub struct CurrentHub {
    get: Arc<dyn Fn() -> Arc<Hub> + Send + Sync>,
}

impl CurrentHub {
    /// Always resolve to the given hub.
    pub fn fixed(hub: Arc<Hub>) -> Self {
        Self {
            get: Arc::new(move || hub.clone()),
        }
    }

    /// Resolve through a custom function.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn() -> Arc<Hub> + Send + Sync + 'static,
    {
        Self { get: Arc::new(f) }
    }

    /// Resolve to the process-wide hub.
    pub fn global() -> Self {
        Self::from_fn(Hub::global)
    }

    /// Get the current hub.
    pub fn get(&self) -> Arc<Hub> {
        (self.get)()
    }
}

impl std::fmt::Debug for CurrentHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrentHub").finish_non_exhaustive()
    }
}
