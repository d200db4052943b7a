//! Table-level error types.
//!
//! These errors describe failures of the backing table itself and know nothing
//! about HTTP or item validation. The handler layer decides how each one is
//! reported.

/// Errors that can occur during table operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A conditional write found the condition false (e.g. the item is gone).
    #[error("The conditional request failed: {condition} on key {key}")]
    ConditionalCheckFailed { key: String, condition: String },

    /// The item carries no usable key attribute.
    #[error("Invalid key: {message}")]
    InvalidKey { message: String },

    /// The data cannot be stored (not an object, wrong attribute shape, ...).
    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    /// The table is temporarily unreachable.
    #[error("Storage unavailable: {message}")]
    Unavailable { message: String },

    /// Generic internal table error.
    #[error("Internal storage error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl StorageError {
    /// Create a conditional-check failure.
    pub fn conditional_check_failed(key: impl Into<String>, condition: impl Into<String>) -> Self {
        Self::ConditionalCheckFailed {
            key: key.into(),
            condition: condition.into(),
        }
    }

    /// Create an invalid-key error.
    pub fn invalid_key(message: impl Into<String>) -> Self {
        Self::InvalidKey {
            message: message.into(),
        }
    }

    /// Create an invalid-data error.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /// Create an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Create an internal error without a source.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Create an internal error wrapping another error.
    pub fn internal_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Internal {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether the error came from a failed write condition.
    pub fn is_conditional_check_failed(&self) -> bool {
        matches!(self, StorageError::ConditionalCheckFailed { .. })
    }
}
