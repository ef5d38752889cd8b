//! Error types for action-core

use thiserror::Error;

/// Result type alias for action-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the registry and the dispatch seam
#[derive(Error, Debug)]
pub enum Error {
    /// No action is registered under the requested name
    #[error("Action '{0}' not found")]
    NotFound(String),

    /// An action with the same name is already registered
    #[error("Action '{0}' already registered")]
    AlreadyRegistered(String),

    /// The supplied parameters do not match the action's input shape
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Error message
        message: String,
    },

    /// Outcome or schema serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid-input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
