//! Error types for the season ladder
//!
//! Library calls return `anyhow::Result` and raise `LadderError` values so
//! callers can `downcast_ref` when they need to tell failures apart.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for ladder computations and data loading
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LadderError {
    #[error("Invalid match record: {reason}")]
    InvalidMatch { reason: String },

    #[error("Player not found in roster: {player_id}")]
    UnknownPlayer { player_id: String },

    #[error("Invalid set score '{score}': {reason}")]
    InvalidSetScore { score: String, reason: String },

    #[error("Invalid date '{value}'")]
    InvalidDate { value: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Data source error: {message}")]
    DataSourceError { message: String },
}

impl LadderError {
    pub(crate) fn invalid_match(reason: impl Into<String>) -> Self {
        LadderError::InvalidMatch {
            reason: reason.into(),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        LadderError::ConfigurationError {
            message: message.into(),
        }
    }

    pub(crate) fn data_source(message: impl Into<String>) -> Self {
        LadderError::DataSourceError {
            message: message.into(),
        }
    }
}
