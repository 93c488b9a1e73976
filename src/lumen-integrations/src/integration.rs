//! Core integration trait.

use std::any::Any;
use std::sync::Arc;

use crate::Result;
use crate::hub::CurrentHub;
use crate::processor::EventProcessors;

/// Trait for optional capability modules plugged into the client.
///
/// Identity is the declared [`name`](Integration::name), not the instance:
/// two different values returning the same name are the same integration
/// for resolution and activation purposes.
pub trait Integration: Send + Sync {
    /// Stable identifier of this integration.
    fn name(&self) -> &str;

    /// Activate the integration against the host services.
    ///
    /// Called at most once per name for the lifetime of the installed-name
    /// registry. Implementations typically register an event processor and
    /// keep the hub accessor around to check whether they are still bound
    /// to the current client.
    fn setup_once(&self, processors: &EventProcessors, hub: &CurrentHub) -> Result<()>;

    /// Access the concrete type, used for typed lookups from the index.
    fn as_any(&self) -> &dyn Any;
}

/// Shared handle to an integration instance.
pub type IntegrationRef = Arc<dyn Integration>;

impl std::fmt::Debug for dyn Integration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Integration")
            .field("name", &self.name())
            .finish()
    }
}

/// Collect the names of a list of integrations, in order.
pub fn integration_names(integrations: &[IntegrationRef]) -> Vec<String> {
    integrations.iter().map(|i| i.name().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);

    impl Integration for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn setup_once(&self, _processors: &EventProcessors, _hub: &CurrentHub) -> Result<()> {
            Ok(())
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_integration_names_keep_order() {
        let list: Vec<IntegrationRef> = vec![Arc::new(Named("b")), Arc::new(Named("a"))];
        assert_eq!(integration_names(&list), vec!["b", "a"]);
    }

    #[test]
    fn test_debug_shows_name() {
        let integration: IntegrationRef = Arc::new(Named("dedupe"));
        assert_eq!(format!("{:?}", integration), "Integration { name: \"dedupe\" }");
    }

    #[test]
    fn test_downcast_through_as_any() {
        let integration: IntegrationRef = Arc::new(Named("x"));
        assert!(integration.as_any().downcast_ref::<Named>().is_some());
    }
}
