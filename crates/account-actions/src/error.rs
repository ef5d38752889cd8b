//! Failure signal shared by every capability provider

use thiserror::Error;

/// Failure reported by a storage provider.
///
/// The variants are uniform across all providers of a capability interface;
/// actions translate them into their own outcome instead of propagating them
/// to the caller. `Clone` so a test double can replay a programmed failure on
/// every call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// A uniqueness or other storage constraint was violated
    #[error("Constraint violated: {0}")]
    Conflict(String),

    /// The backing store failed to perform the operation
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// A stored value could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Create a backend error
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }
}
