//! Global event processor pipeline.
//!
//! Integrations hook into event capture by registering processors here from
//! their `setup_once`. Processors run in registration order; returning `None`
//! drops the event.

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::event::Event;

/// A processor transforms an event or drops it.
pub type EventProcessor = Arc<dyn Fn(Event) -> Option<Event> + Send + Sync>;

/// Process-wide processor pipeline.
static GLOBAL_PROCESSORS: Lazy<Arc<EventProcessors>> =
    Lazy::new(|| Arc::new(EventProcessors::new()));

/// Ordered collection of event processors.
pub struct EventProcessors {
    processors: RwLock<Vec<EventProcessor>>,
}

impl EventProcessors {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self {
            processors: RwLock::new(Vec::new()),
        }
    }

    /// Get the process-wide pipeline.
    pub fn global() -> Arc<EventProcessors> {
        GLOBAL_PROCESSORS.clone()
    }

    /// Append a processor to the pipeline.
    pub fn register<F>(&self, processor: F)
    where
        F: Fn(Event) -> Option<Event> + Send + Sync + 'static,
    {
        self.processors.write().push(Arc::new(processor));
    }

    /// Run an event through every processor.
    pub fn apply(&self, event: Event) -> Option<Event> {
        // Snapshot so a processor may register further processors.
        let processors = self.processors.read().clone();

        let mut current = event;
        for processor in processors.iter() {
            match processor(current) {
                Some(next) => current = next,
                None => {
                    tracing::trace!("Event dropped by processor");
                    return None;
                }
            }
        }
        Some(current)
    }

    /// Number of registered processors.
    pub fn len(&self) -> usize {
        self.processors.read().len()
    }

    /// Whether no processor is registered.
    pub fn is_empty(&self) -> bool {
        self.processors.read().is_empty()
    }
}

impl Default for EventProcessors {
    fn default() -> Self {
        Self::new()
    }
}
