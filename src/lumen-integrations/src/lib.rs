//! # Lumen Integrations
//!
//! Decides which optional capability modules ("integrations") of the Lumen
//! instrumentation client are active, in what order, and makes sure each one
//! is set up exactly once.
//!
//! ## Overview
//!
//! - **Resolution**: [`resolve`] merges the host's default integrations with
//!   the caller's override (a list, a transform function, or nothing).
//!   Integrations are identified by [`Integration::name`], never by instance.
//! - **Activation**: [`Activator`] installs the resolved list against the host
//!   services and returns an [`IntegrationIndex`]. A name's `setup_once` runs at
//!   most once for the life of the [`InstalledIntegrations`] registry, no
//!   matter how many instances or install passes request it.
//! - **Settings**: [`IntegrationSettings`] and [`IntegrationCatalog`] map a TOML
//!   configuration section onto [`IntegrationOptions`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use lumen_integrations::{Activator, IntegrationOptions};
//!
//! let options = IntegrationOptions::new()
//!     .with_defaults(host_defaults())
//!     .with_integrations(vec![Arc::new(MyIntegration::default())]);
//!
//! let activator = Activator::global();
//! let index = activator.install_all(&options);
//! lumen_integrations::Hub::global().bind_integrations(index);
//! ```

pub mod activator;
pub mod config;
pub mod error;
pub mod event;
pub mod hub;
pub mod index;
pub mod integration;
pub mod options;
pub mod processor;
pub mod registry;
pub mod resolver;

// Re-exports for convenience
pub use activator::{Activator, InstallOutcome};
pub use config::{IntegrationCatalog, IntegrationFactory, IntegrationSettings};
pub use error::{IntegrationError, Result};
pub use event::{Event, Level};
pub use hub::{CurrentHub, Hub};
pub use index::IntegrationIndex;
pub use integration::{Integration, IntegrationRef, integration_names};
pub use options::{IntegrationOptions, IntegrationsOverride, TransformFn, TransformOutput};
pub use processor::{EventProcessor, EventProcessors};
pub use registry::{Claim, InstalledIntegrations};
pub use resolver::resolve;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
