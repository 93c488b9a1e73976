//! Options consumed by the resolver.

use std::sync::Arc;

use crate::integration::IntegrationRef;

/// Function form of the user override: receives a copy of the defaults and
/// returns the final list (or a single integration).
pub type TransformFn = Arc<dyn Fn(Vec<IntegrationRef>) -> TransformOutput + Send + Sync>;

/// What a transform function may return.
pub enum TransformOutput {
    /// A full list of integrations
    Many(Vec<IntegrationRef>),
    /// A single integration, wrapped into a one-element list
    One(IntegrationRef),
}

impl TransformOutput {
    /// Flatten into a list.
    pub fn into_vec(self) -> Vec<IntegrationRef> {
        match self {
            Self::Many(list) => list,
            Self::One(integration) => vec![integration],
        }
    }
}

impl From<Vec<IntegrationRef>> for TransformOutput {
    fn from(list: Vec<IntegrationRef>) -> Self {
        Self::Many(list)
    }
}

impl From<IntegrationRef> for TransformOutput {
    fn from(integration: IntegrationRef) -> Self {
        Self::One(integration)
    }
}

/// User-supplied override of the default integrations.
#[derive(Clone, Default)]
pub enum IntegrationsOverride {
    /// No override, use the defaults unchanged
    #[default]
    Absent,
    /// Explicit list merged with the defaults, overrides winning by name
    List(Vec<IntegrationRef>),
    /// Function producing the final list from the defaults
    Transform(TransformFn),
}

impl std::fmt::Debug for IntegrationsOverride {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Absent => write!(f, "Absent"),
            Self::List(list) => f.debug_tuple("List").field(list).finish(),
            Self::Transform(_) => write!(f, "Transform(..)"),
        }
    }
}

/// Integration-related client options.
#[derive(Clone, Default, Debug)]
pub struct IntegrationOptions {
    /// Host-provided baseline set; `None` is treated as empty
    pub default_integrations: Option<Vec<IntegrationRef>>,

    /// Caller override
    pub integrations: IntegrationsOverride,
}

impl IntegrationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default integrations.
    pub fn with_defaults(mut self, defaults: Vec<IntegrationRef>) -> Self {
        self.default_integrations = Some(defaults);
        self
    }

    /// Override with an explicit list.
    pub fn with_integrations(mut self, integrations: Vec<IntegrationRef>) -> Self {
        self.integrations = IntegrationsOverride::List(integrations);
        self
    }

    /// Override with a transform function.
    pub fn with_transform<F, O>(mut self, transform: F) -> Self
    where
        F: Fn(Vec<IntegrationRef>) -> O + Send + Sync + 'static,
        O: Into<TransformOutput>,
    {
        self.integrations =
            IntegrationsOverride::Transform(Arc::new(move |defaults| transform(defaults).into()));
        self
    }

    /// The defaults, or an empty slice when absent.
    pub fn defaults(&self) -> &[IntegrationRef] {
        self.default_integrations.as_deref().unwrap_or(&[])
    }
}
