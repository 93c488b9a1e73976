//! Integration activation.
//!
//! The activator installs resolved integrations against the host services,
//! running each name's `setup_once` at most once for the life of its
//! installed-name registry.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::IntegrationError;
use crate::hub::CurrentHub;
use crate::index::IntegrationIndex;
use crate::integration::IntegrationRef;
use crate::options::IntegrationOptions;
use crate::processor::EventProcessors;
use crate::registry::{Claim, InstalledIntegrations};
use crate::resolver::resolve;

/// Outcome of a single activation attempt.
#[derive(Debug)]
pub enum InstallOutcome {
    /// `setup_once` ran and succeeded
    Installed,
    /// The name was already installed (or being installed); nothing ran
    AlreadyInstalled,
    /// `setup_once` returned an error; the name stays uninstalled
    Failed(IntegrationError),
}

impl InstallOutcome {
    /// Whether this call ran the setup hook successfully.
    pub fn is_installed(&self) -> bool {
        matches!(self, Self::Installed)
    }
}

/// Installs integrations against host services.
#[derive(Clone)]
pub struct Activator {
    /// Installed-name registry
    installed: Arc<InstalledIntegrations>,

    /// Global event processor pipeline
    processors: Arc<EventProcessors>,

    /// Current hub accessor
    hub: CurrentHub,
}

impl Activator {
    /// Create an activator over explicit host services.
    pub fn new(
        installed: Arc<InstalledIntegrations>,
        processors: Arc<EventProcessors>,
        hub: CurrentHub,
    ) -> Self {
        Self {
            installed,
            processors,
            hub,
        }
    }

    /// Create an activator over the process-wide registry, pipeline and hub.
    pub fn global() -> Self {
        Self::new(
            InstalledIntegrations::global(),
            EventProcessors::global(),
            CurrentHub::global(),
        )
    }

    /// Install a single integration unless its name is already installed.
    ///
    /// A panic inside `setup_once` is caught and reported as
    /// [`InstallOutcome::Failed`]; the claim is released either way.
    pub fn install_one(&self, integration: &IntegrationRef) -> InstallOutcome {
        let name = integration.name();

        match self.installed.claim(name) {
            Claim::Acquired => {}
            Claim::Installed | Claim::InProgress => return InstallOutcome::AlreadyInstalled,
        }

        let setup = panic::catch_unwind(AssertUnwindSafe(|| {
            integration.setup_once(&self.processors, &self.hub)
        }))
        .unwrap_or_else(|payload| {
            Err(IntegrationError::setup_failed(
                name,
                format!("setup panicked: {}", panic_message(payload.as_ref())),
            ))
        });

        match setup {
            Ok(()) => {
                self.installed.complete(name);
                debug!("Integration installed: {}", name);
                InstallOutcome::Installed
            }
            Err(e) => {
                self.installed.release(name);
                warn!("Failed to install integration {}: {}", name, e);
                InstallOutcome::Failed(e)
            }
        }
    }

    /// Resolve the options and install every resulting integration.
    ///
    /// The returned index holds every resolved integration, including ones
    /// whose setup failed in this pass.
    pub fn install_all(&self, options: &IntegrationOptions) -> IntegrationIndex {
        let mut index = IntegrationIndex::new();
        let mut installed = 0usize;
        let mut failed = 0usize;

        for integration in resolve(options) {
            index.insert(integration.clone());
            match self.install_one(&integration) {
                InstallOutcome::Installed => installed += 1,
                InstallOutcome::Failed(_) => failed += 1,
                InstallOutcome::AlreadyInstalled => {}
            }
        }

        info!(
            "Integrations active: {} ({} newly installed, {} failed)",
            index.len(),
            installed,
            failed
        );
        index
    }

    /// Names installed so far, in completion order.
    pub fn installed_names(&self) -> Vec<String> {
        self.installed.names()
    }

    /// The installed-name registry this activator records into.
    pub fn registry(&self) -> &Arc<InstalledIntegrations> {
        &self.installed
    }

    /// The processor pipeline handed to setup hooks.
    pub fn processors(&self) -> &Arc<EventProcessors> {
        &self.processors
    }

    /// The hub accessor handed to setup hooks.
    pub fn hub(&self) -> &CurrentHub {
        &self.hub
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
