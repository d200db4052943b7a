//! Shared test utilities for item handler integration tests.
//!
//! - `fixtures` - Request payloads and handler setup
//! - `tables` - Table doubles that fail or race on purpose

#![allow(dead_code)]

pub mod fixtures;
pub mod tables;

use item_service::storage::InMemoryTable;
use item_service::{ItemOperationHandler, ItemRequest, ItemResponse, ServiceConfig};
use serde_json::Value;

pub const TABLE_NAME: &str = "items-test";

/// Handler over a fresh in-memory table.
pub fn create_handler() -> ItemOperationHandler<InMemoryTable> {
    ItemOperationHandler::new(InMemoryTable::new(TABLE_NAME), ServiceConfig::new(TABLE_NAME))
}

/// Create an item and return its JSON as stored.
pub async fn create_item(
    handler: &ItemOperationHandler<InMemoryTable>,
    name: &str,
    description: &str,
) -> Value {
    let response = handler
        .handle_create(ItemRequest::with_body(&fixtures::item_body(name, description)))
        .await;
    assert_eq!(response.status_code, 201, "create failed: {}", response.body);
    body_of(&response)["item"].clone()
}

/// The `id` of an item JSON value.
pub fn id_of(item: &Value) -> String {
    item["id"]
        .as_str()
        .expect("item should have a string id")
        .to_string()
}

/// Parse a response body, panicking with the raw body on failure.
pub fn body_of(response: &ItemResponse) -> Value {
    response
        .json_body()
        .unwrap_or_else(|e| panic!("response body is not JSON ({}): {}", e, response.body))
}

/// Assert that a response has the given status and error text.
pub fn assert_error(response: &ItemResponse, status_code: u16, error: &str) {
    assert_eq!(
        response.status_code, status_code,
        "unexpected status, body: {}",
        response.body
    );
    assert_eq!(body_of(response)["error"], error);
}
