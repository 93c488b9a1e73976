//! Resolution of the final integration list from defaults and overrides.

use std::collections::HashSet;

use crate::integration::IntegrationRef;
use crate::options::{IntegrationOptions, IntegrationsOverride};

/// Compute the ordered list of integrations to install.
///
/// - **List override**: defaults not shadowed by an override name come first,
///   in default order, followed by the overrides in their own order. The first
///   occurrence of a name wins within either list.
/// - **Transform override**: the function's result is used as is, with no
///   deduplication. It receives a copy of the defaults.
/// - **Absent**: a copy of the defaults, duplicate names included.
pub fn resolve(options: &IntegrationOptions) -> Vec<IntegrationRef> {
    let defaults = options.defaults();

    let resolved = match &options.integrations {
        IntegrationsOverride::List(overrides) => merge(defaults, overrides),
        IntegrationsOverride::Transform(transform) => transform(defaults.to_vec()).into_vec(),
        IntegrationsOverride::Absent => defaults.to_vec(),
    };

    tracing::trace!(
        "Resolved {} integrations from {} defaults",
        resolved.len(),
        defaults.len()
    );
    resolved
}

fn merge(defaults: &[IntegrationRef], overrides: &[IntegrationRef]) -> Vec<IntegrationRef> {
    let override_names: HashSet<&str> = overrides.iter().map(|i| i.name()).collect();
    let mut picked: HashSet<&str> = HashSet::new();
    let mut merged = Vec::with_capacity(defaults.len() + overrides.len());

    for integration in defaults {
        let name = integration.name();
        if !override_names.contains(name) && picked.insert(name) {
            merged.push(integration.clone());
        }
    }

    for integration in overrides {
        if picked.insert(integration.name()) {
            merged.push(integration.clone());
        }
    }

    merged
}
