//! Error handling for the cost engine
//!
//! This module defines all error types used throughout the engine.

use thiserror::Error;

/// Result type alias for the engine
pub type Result<T> = std::result::Result<T, EngineError>;

/// Main error type for the engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// Unknown or unregistered provider identifier (client error)
    #[error("Unsupported cloud provider: {provider}. Supported providers: {supported}")]
    UnsupportedProvider { provider: String, supported: String },

    /// Request that cannot produce a meaningful answer
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// One provider's sub-computation failed; recovered locally by exclusion
    #[error("Provider evaluation failed for {provider}: {message}")]
    Evaluation { provider: String, message: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Build an `UnsupportedProvider` error listing the registered providers.
    pub fn unsupported_provider(provider: impl Into<String>, supported: &[&str]) -> Self {
        EngineError::UnsupportedProvider {
            provider: provider.into(),
            supported: supported.join(", "),
        }
    }

    /// Build an `Evaluation` error with provider context.
    pub fn evaluation(provider: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::Evaluation {
            provider: provider.into(),
            message: message.into(),
        }
    }
}
