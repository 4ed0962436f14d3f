//! Error types for boxforge-core

use thiserror::Error;

/// Result type alias using boxforge-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading, validating, or rendering configuration
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// One line per failed schema check, pre-indented for terminal output
    #[error("Schema validation failed:\n{errors}")]
    SchemaValidation { errors: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Template rendering failed: {0}")]
    Template(String),
}

impl Error {
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Join individual schema failures into one report
    pub fn schema_validation(errors: Vec<String>) -> Self {
        Self::SchemaValidation {
            errors: errors.join("\n"),
        }
    }
}
