//! Core error types for foco-core.
//!
//! The timer engine itself never fails; these errors live at the edges:
//! loading configuration, validating user input and talking to a timer
//! service that has already shut down.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for foco-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The timer service task is gone (shut down or panicked).
    #[error("Timer service has stopped")]
    ServiceStopped,

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors for caller-facing input.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Numeric input outside the accepted range
    #[error("'{field}' must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Input that should have been a number
    #[error("'{field}' is not a number: {input:?}")]
    InvalidNumber { field: String, input: String },

    /// Text that is empty once trimmed
    #[error("'{0}' must not be empty")]
    EmptyText(String),

    /// Reference to a task that does not exist
    #[error("No task with id {0}")]
    UnknownTask(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
