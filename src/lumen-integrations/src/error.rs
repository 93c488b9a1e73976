//! Integration error types.

use thiserror::Error;

/// Integration layer errors.
///
/// Resolution and installation never surface these to their callers; a failed
/// setup is captured per integration and reported through
/// [`InstallOutcome`](crate::InstallOutcome).
#[derive(Error, Debug)]
pub enum IntegrationError {
    /// An integration's `setup_once` hook failed.
    #[error("Failed to set up integration '{integration}': {message}")]
    SetupFailed {
        integration: String,
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl IntegrationError {
    /// Create a setup error.
    pub fn setup_failed(integration: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SetupFailed {
            integration: integration.into(),
            message: message.into(),
        }
    }
}

impl From<toml::de::Error> for IntegrationError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias for integration operations.
pub type Result<T> = std::result::Result<T, IntegrationError>;
