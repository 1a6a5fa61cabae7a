//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Catalog seed file error: {0}")]
    SeedFile(String),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid URL in {field}: {reason}")]
    InvalidUrl { field: &'static str, reason: String },

    #[error("Invalid bind address {addr}")]
    InvalidBindAddress { addr: String },

    #[error("API integration mode requires a private key")]
    ApiModeWithoutPrivateKey,
}
