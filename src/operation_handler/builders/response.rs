//! Response builder utilities for ItemResponse
//!
//! Every response carries the same JSON content type and CORS headers; only
//! the allowed-methods value differs per operation.

use crate::{
    config::ServiceConfig,
    operation_handler::core::{ItemOperation, ItemResponse},
};
use serde_json::Value;
use std::collections::BTreeMap;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
pub const ALLOW_METHODS: &str = "Access-Control-Allow-Methods";

/// The fixed header set for an operation's responses.
pub fn response_headers(operation: ItemOperation, config: &ServiceConfig) -> BTreeMap<String, String> {
    BTreeMap::from([
        (CONTENT_TYPE.to_string(), "application/json".to_string()),
        (ALLOW_ORIGIN.to_string(), config.allowed_origin.clone()),
        (ALLOW_HEADERS.to_string(), config.allowed_headers.clone()),
        (ALLOW_METHODS.to_string(), operation.allowed_methods()),
    ])
}

impl ItemResponse {
    /// Build a JSON response with the operation's headers.
    pub fn json(
        status_code: u16,
        operation: ItemOperation,
        config: &ServiceConfig,
        body: &Value,
    ) -> Self {
        Self {
            status_code,
            headers: response_headers(operation, config),
            body: body.to_string(),
        }
    }

    /// 200 OK.
    pub fn ok(operation: ItemOperation, config: &ServiceConfig, body: &Value) -> Self {
        Self::json(200, operation, config, body)
    }

    /// 201 Created.
    pub fn created(operation: ItemOperation, config: &ServiceConfig, body: &Value) -> Self {
        Self::json(201, operation, config, body)
    }
}
