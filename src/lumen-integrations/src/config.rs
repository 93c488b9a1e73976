//! Integration settings and the catalog of known integrations.
//!
//! Settings are plain data (usually a section of the client's TOML
//! configuration). They name integrations; the host's [`IntegrationCatalog`]
//! turns those names into instances.
//!
//! ```toml
//! default_integrations = true
//! disabled = ["dedupe"]
//! integrations = ["breadcrumbs", "release"]
//! ```

use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::integration::IntegrationRef;
use crate::options::{IntegrationOptions, IntegrationsOverride};

/// Integration settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationSettings {
    /// Whether the catalog's default integrations are used at all
    #[serde(default = "default_true")]
    pub default_integrations: bool,

    /// Override list by name. Anything other than an array of strings is
    /// ignored with a warning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integrations: Option<toml::Value>,

    /// Default integrations to leave out, by catalog name. An entry
    /// registered under an alias is disabled by that alias, not by the
    /// `Integration::name()` of the instance it creates.
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl Default for IntegrationSettings {
    fn default() -> Self {
        Self {
            default_integrations: true,
            integrations: None,
            disabled: Vec::new(),
        }
    }
}

impl IntegrationSettings {
    /// Parse settings from TOML.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Set an explicit override list.
    pub fn with_integrations<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names
            .into_iter()
            .map(|n| toml::Value::String(n.into()))
            .collect();
        self.integrations = Some(toml::Value::Array(names));
        self
    }

    /// Disable a default integration.
    pub fn disable(&mut self, name: &str) {
        if !self.disabled.iter().any(|n| n == name) {
            self.disabled.push(name.to_string());
        }
    }

    /// Whether the default catalog entry `name` is disabled.
    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled.iter().any(|n| n == name)
    }

    /// The override list, if the setting is well formed.
    ///
    /// Returns `None` when the key is missing or malformed; malformed values
    /// are reported and otherwise treated as missing.
    pub fn override_names(&self) -> Option<Vec<String>> {
        let value = self.integrations.as_ref()?;

        let names = value.as_array().and_then(|items| {
            items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
        });

        if names.is_none() {
            tracing::warn!(
                "Ignoring malformed `integrations` setting ({}), using defaults",
                value.type_str()
            );
        }
        names
    }

    /// Build resolver options from these settings and a catalog.
    pub fn to_options(&self, catalog: &IntegrationCatalog) -> IntegrationOptions {
        let defaults = if self.default_integrations {
            catalog
                .default_names()
                .into_iter()
                .filter(|name| !self.is_disabled(name))
                .filter_map(|name| catalog.create(&name))
                .collect()
        } else {
            Vec::new()
        };

        let integrations = match self.override_names() {
            Some(names) => IntegrationsOverride::List(
                names
                    .iter()
                    .filter_map(|name| {
                        let created = catalog.create(name);
                        if created.is_none() {
                            tracing::warn!("Unknown integration '{}' in settings, skipping", name);
                        }
                        created
                    })
                    .collect(),
            ),
            None => IntegrationsOverride::Absent,
        };

        IntegrationOptions {
            default_integrations: Some(defaults),
            integrations,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Factory producing a fresh integration instance.
pub type IntegrationFactory = Arc<dyn Fn() -> IntegrationRef + Send + Sync>;

struct CatalogEntry {
    factory: IntegrationFactory,
    default: bool,
}

/// Host table of known integrations, keyed by name in registration order.
#[derive(Default)]
pub struct IntegrationCatalog {
    entries: IndexMap<String, CatalogEntry>,
}

impl IntegrationCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an integration that is only used when named explicitly.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> IntegrationRef + Send + Sync + 'static,
    {
        self.insert(name.into(), Arc::new(factory), false);
    }

    /// Register an integration that is part of the default set.
    pub fn register_default<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> IntegrationRef + Send + Sync + 'static,
    {
        self.insert(name.into(), Arc::new(factory), true);
    }

    fn insert(&mut self, name: String, factory: IntegrationFactory, default: bool) {
        if self
            .entries
            .insert(name.clone(), CatalogEntry { factory, default })
            .is_some()
        {
            tracing::debug!("Replaced catalog entry for integration {}", name);
        }
    }

    /// Create an instance of a named integration.
    pub fn create(&self, name: &str) -> Option<IntegrationRef> {
        self.entries.get(name).map(|entry| (entry.factory)())
    }

    /// All registered names.
    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Names of the default set, in registration order.
    pub fn default_names(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.default)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Fresh instances of the default set.
    pub fn defaults(&self) -> Vec<IntegrationRef> {
        self.entries
            .values()
            .filter(|entry| entry.default)
            .map(|entry| (entry.factory)())
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}
