//! Registry of integration names that completed activation.
//!
//! The registry only ever grows. Activation is a two-step protocol: a caller
//! first [claims](InstalledIntegrations::claim) a name, runs the setup hook
//! outside the lock, then either [completes](InstalledIntegrations::complete)
//! or [releases](InstalledIntegrations::release) the claim. A name that is
//! installed or claimed cannot be claimed again, so concurrent callers never
//! run the same setup twice.

use std::collections::HashSet;
use std::sync::Arc;

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use parking_lot::Mutex;

/// Process-wide installed-name registry.
static GLOBAL_INSTALLED: Lazy<Arc<InstalledIntegrations>> =
    Lazy::new(|| Arc::new(InstalledIntegrations::new()));

/// Result of trying to claim a name for activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claim {
    /// The caller owns the activation and must complete or release it.
    Acquired,
    /// The name already completed activation.
    Installed,
    /// Another caller is activating the name right now.
    InProgress,
}

#[derive(Default)]
struct State {
    /// Installed names, in completion order
    installed: IndexSet<String>,
    /// Names currently being activated
    pending: HashSet<String>,
}

/// Set of installed integration names.
pub struct InstalledIntegrations {
    state: Mutex<State>,
}

impl InstalledIntegrations {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
        }
    }

    /// Get the process-wide registry.
    pub fn global() -> Arc<InstalledIntegrations> {
        GLOBAL_INSTALLED.clone()
    }

    /// Try to claim `name` for activation.
    pub fn claim(&self, name: &str) -> Claim {
        let mut state = self.state.lock();
        if state.installed.contains(name) {
            return Claim::Installed;
        }
        if !state.pending.insert(name.to_string()) {
            return Claim::InProgress;
        }
        Claim::Acquired
    }

    /// Mark a claimed name as installed.
    pub fn complete(&self, name: &str) {
        let mut state = self.state.lock();
        state.pending.remove(name);
        state.installed.insert(name.to_string());
    }

    /// Drop a claim without installing, so a later caller may retry.
    pub fn release(&self, name: &str) {
        self.state.lock().pending.remove(name);
    }

    /// Check whether a name completed activation.
    pub fn is_installed(&self, name: &str) -> bool {
        self.state.lock().installed.contains(name)
    }

    /// Installed names in completion order.
    pub fn names(&self) -> Vec<String> {
        self.state.lock().installed.iter().cloned().collect()
    }

    /// Number of installed names.
    pub fn len(&self) -> usize {
        self.state.lock().installed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().installed.is_empty()
    }
}

impl Default for InstalledIntegrations {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InstalledIntegrations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstalledIntegrations")
            .field("installed", &self.names())
            .finish()
    }
}
