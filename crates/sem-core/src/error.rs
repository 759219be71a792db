//! Error types for sem-core

use thiserror::Error;

/// Core error type for the semantic layer
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration file not found
    #[error("configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Failed to parse configuration file
    #[error("failed to parse configuration: {message}")]
    ConfigParseError { message: String },

    /// Invalid configuration value
    #[error("invalid configuration: {message}")]
    ConfigInvalid { message: String },

    /// Descriptor root directory not found
    #[error("descriptor root not found: {path}")]
    DescriptorRootNotFound { path: String },

    /// Entity descriptor file not found
    #[error("entity descriptor not found: {name}")]
    EntityNotFound { name: String },

    /// Entity descriptor parse error
    #[error("failed to parse entity {name}: {message}")]
    EntityParseError { name: String, message: String },

    /// Entity descriptor violates a structural or cross-field invariant
    #[error("entity {name} is invalid: {message}")]
    EntityInvariantViolation { name: String, message: String },

    /// Catalog file missing or invalid
    #[error("catalog is invalid: {message}")]
    CatalogInvalid { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
