//! Error types for the trigger loader.

use crate::error::TriggerError;

/// Errors that can occur while loading a trigger configuration.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error.
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A fragment could not be denormalized into a trigger.
    #[error("Trigger error: {0}")]
    Trigger(#[from] TriggerError),

    /// The document does not have the expected shape.
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result alias for loader operations.
pub type Result<T> = std::result::Result<T, LoadError>;
