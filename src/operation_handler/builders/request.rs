//! Request builder utilities for ItemRequest
//!
//! Convenience constructors for request events, mostly useful to callers that
//! embed the handlers directly and to tests.

use crate::operation_handler::core::ItemRequest;
use serde_json::Value;
use std::collections::HashMap;

impl ItemRequest {
    /// A request carrying a serialized JSON body.
    pub fn with_body(body: &Value) -> Self {
        Self {
            body: Some(body.to_string()),
            ..Default::default()
        }
    }

    /// A request addressing an item by path parameter.
    pub fn for_path_id(id: impl Into<String>) -> Self {
        Self::default().path_id_param(id)
    }

    /// A request carrying only query string parameters.
    pub fn with_query<K, V>(params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut request = Self::default();
        for (name, value) in params {
            request = request.query(name, value);
        }
        request
    }

    /// Set the `id` path parameter.
    pub fn path_id_param(mut self, id: impl Into<String>) -> Self {
        self.path_parameters
            .get_or_insert_with(HashMap::new)
            .insert("id".to_string(), id.into());
        self
    }

    /// Add a query string parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_string_parameters
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Replace the body.
    pub fn body(mut self, body: &Value) -> Self {
        self.body = Some(body.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builders() {
        let request = ItemRequest::for_path_id("abc").body(&json!({"name": "Lamp"}));
        assert_eq!(request.path_id(), Some("abc"));
        assert_eq!(request.payload_object().unwrap()["name"], "Lamp");

        let request = ItemRequest::with_query([("limit", "2"), ("last_key", "k")]);
        assert_eq!(request.query_param("limit"), Some("2"));
        assert_eq!(request.query_param("last_key"), Some("k"));
        assert!(request.body.is_none());
    }
}
