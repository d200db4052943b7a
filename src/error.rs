//! Error types for item handler operations.
//!
//! Every handler returns [`ItemResult`] internally. The error variant decides the
//! HTTP status code of the response; see
//! [`create_error_response`](crate::operation_handler::create_error_response).

use crate::storage::StorageError;

/// Main error type for item handler operations.
#[derive(Debug, thiserror::Error)]
pub enum ItemError {
    /// The request payload failed field validation.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Update and delete need an identifier and none was supplied.
    #[error("Item ID is required")]
    MissingId,

    /// The request body is not a JSON object.
    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },

    /// The `limit` query parameter is not a positive integer.
    #[error("Invalid limit: {value}")]
    InvalidLimit { value: String },

    /// The referenced item does not exist.
    #[error("Item not found")]
    NotFound { id: String },

    /// Any failure reported by the backing table.
    #[error("{0}")]
    Storage(#[from] StorageError),

    /// A stored record could not be converted to or from JSON.
    #[error("{0}")]
    Serialization(#[from] serde_json::Error),
}

impl ItemError {
    /// Create a not-found error for an item id.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create an invalid-body error.
    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self::InvalidBody {
            message: message.into(),
        }
    }

    /// HTTP status code this error is reported with.
    pub fn status_code(&self) -> u16 {
        match self {
            ItemError::Validation(_)
            | ItemError::MissingId
            | ItemError::InvalidBody { .. }
            | ItemError::InvalidLimit { .. } => 400,
            ItemError::NotFound { .. } => 404,
            ItemError::Storage(_) | ItemError::Serialization(_) => 500,
        }
    }

    /// Whether this is a client error (4xx) rather than an internal failure.
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

/// Field validation errors for item payloads.
///
/// Each variant names the offending field so the response can tell the caller
/// exactly what to fix.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field is absent (or `null`).
    #[error("Missing required field: {field}")]
    MissingRequiredField { field: &'static str },

    /// A required field is present but empty.
    #[error("Field must not be empty: {field}")]
    EmptyField { field: &'static str },

    /// A field holds a value of the wrong JSON type.
    #[error("Invalid value for field {field}: expected {expected}")]
    InvalidFieldType {
        field: &'static str,
        expected: &'static str,
    },
}

impl ValidationError {
    /// The field this error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingRequiredField { field }
            | ValidationError::EmptyField { field }
            | ValidationError::InvalidFieldType { field, .. } => field,
        }
    }
}

/// Result type alias for item handler operations.
pub type ItemResult<T> = Result<T, ItemError>;

/// Result type alias for payload validation.
pub type ValidationResult<T> = Result<T, ValidationError>;
