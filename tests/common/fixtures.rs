//! Request payload fixtures.

use serde_json::{Value, json};

/// Minimal valid create payload.
pub fn item_body(name: &str, description: &str) -> Value {
    json!({
        "name": name,
        "description": description,
    })
}

/// Create payload with every optional field set.
pub fn full_item_body() -> Value {
    json!({
        "name": "Desk lamp",
        "description": "Adjustable LED lamp",
        "category": "lighting",
        "tags": ["home", "office"],
    })
}

/// A gateway event for `PUT /items/{id}` with a JSON body.
pub fn update_event(id: &str, body: &Value) -> Value {
    json!({
        "httpMethod": "PUT",
        "resource": "/items/{id}",
        "pathParameters": {"id": id},
        "queryStringParameters": null,
        "body": body.to_string(),
    })
}
