//! Configuration error types

/// Errors raised while reading storefront configuration.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("{0} is not set")]
    Missing(&'static str),

    /// A variable is set but its value cannot be used.
    #[error("{key} has an invalid value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    /// Creates a new invalid value error.
    pub fn invalid(key: &'static str, value: impl Into<String>, reason: impl ToString) -> Self {
        Self::Invalid {
            key,
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}
