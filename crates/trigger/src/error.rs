//! Error type shared by the time parsers, the trigger model and the registry.

use serde_yaml::Value;

/// Errors raised while parsing, denormalizing or activating triggers.
#[derive(Debug, thiserror::Error)]
pub enum TriggerError {
    /// A duration token used a unit that matches no step of the unit ladder.
    #[error("Invalid unit: '{0}'")]
    InvalidUnit(String),

    /// A duration did not fit into `u64` milliseconds.
    #[error("Duration overflows: '{0}'")]
    DurationOverflow(String),

    /// A time-of-day string could not be parsed.
    #[error("Invalid instant: '{0}'")]
    InvalidInstant(String),

    /// No converter accepts the config fragment.
    #[error("Unsupported config ({reason}): {}", render(config))]
    Unsupported { config: Value, reason: String },

    /// A composite trigger without children was activated.
    #[error("Cannot activate a composite trigger without children")]
    EmptyComposite,
}

impl TriggerError {
    pub(crate) fn unsupported(config: &Value, reason: impl Into<String>) -> Self {
        TriggerError::Unsupported {
            config: config.clone(),
            reason: reason.into(),
        }
    }
}

/// Result alias for trigger operations.
pub type Result<T> = std::result::Result<T, TriggerError>;

fn render(config: &Value) -> String {
    serde_yaml::to_string(config)
        .map(|s| s.trim_end().replace('\n', "; "))
        .unwrap_or_else(|_| format!("{:?}", config))
}
