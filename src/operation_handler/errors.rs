//! Error handling utilities for operation handlers
//!
//! Turns an [`ItemError`] into the response sent to the caller and logs it.

use crate::{
    config::ServiceConfig,
    error::ItemError,
    operation_handler::core::{ItemResponse, OperationContext},
};
use log::{error, warn};
use serde_json::json;

/// Create an error response from an ItemError.
///
/// Client errors carry `{"error": <message>}`. Internal errors carry
/// `{"error": "Internal server error"}` plus the raw error text as `message`
/// when [`ServiceConfig::expose_error_details`] is set.
pub fn create_error_response(
    error: &ItemError,
    context: &OperationContext,
    config: &ServiceConfig,
) -> ItemResponse {
    let status_code = error.status_code();

    let body = if error.is_client_error() {
        warn!(
            "Item handler rejected {} with {}: {} (request: '{}')",
            context.operation, status_code, error, context.request_id
        );
        json!({ "error": error.to_string() })
    } else {
        error!(
            "Item handler failed {}: {} (request: '{}')",
            context.operation, error, context.request_id
        );
        if config.expose_error_details {
            json!({ "error": "Internal server error", "message": error.to_string() })
        } else {
            json!({ "error": "Internal server error" })
        }
    };

    ItemResponse::json(status_code, context.operation, config, &body)
}
