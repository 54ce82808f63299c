//! Error types for the Adaptive Acceleration reporting client

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for credential and signing operations
#[derive(Error, Debug)]
pub enum AaError {
    /// The edgerc file does not exist
    #[error("Edgerc file not found: {}", .0.display())]
    EdgercNotFound(PathBuf),

    /// The requested section is absent from the edgerc file
    #[error("Section '{0}' not found in edgerc file")]
    SectionNotFound(String),

    /// A required credential field is missing or empty
    #[error("Missing credential field: {0}")]
    MissingCredential(&'static str),

    /// The edgerc file could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// The configured host does not form a usable base URL
    #[error("Invalid host: {0}")]
    InvalidHost(String),

    /// A path ID that no request URL can address
    #[error("Invalid ID '{0}': '.' and '..' cannot be used as a path segment")]
    InvalidPathId(String),

    /// HMAC key setup failed
    #[error("Signing error: {0}")]
    Signing(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, AaError>;

impl From<config::ConfigError> for AaError {
    fn from(err: config::ConfigError) -> Self {
        AaError::Config(err.to_string())
    }
}
