//! Core operation handler infrastructure
//!
//! This module contains the request/response event types, the operation enum
//! and the handler struct that owns the table handle and dispatches to the
//! four item handlers.

use crate::{
    config::ServiceConfig,
    error::{ItemError, ItemResult},
    storage::ItemTable,
};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// Framework-agnostic handler for item operations
///
/// Holds the table handle and configuration, both created once at process
/// start. The handler itself keeps no state between requests.
pub struct ItemOperationHandler<T: ItemTable> {
    pub(super) table: T,
    pub(super) config: ServiceConfig,
}

/// Incoming request event
///
/// Mirrors the proxy-integration event shape of HTTP gateways. Unknown
/// top-level fields are kept in `extra`; when there is no `body`, they serve as
/// the request payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    /// Serialized JSON object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_parameters: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Outgoing response event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    /// Serialized JSON value
    pub body: String,
}

/// The four item operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemOperation {
    /// Create a new item
    Create,
    /// Fetch one item or list a page of items
    Read,
    /// Partially update an existing item
    Update,
    /// Delete an existing item
    Delete,
}

/// Per-invocation context passed to the handlers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationContext {
    pub operation: ItemOperation,
    /// Request ID for log correlation
    pub request_id: String,
}

impl ItemOperation {
    pub const ALL: [ItemOperation; 4] = [
        ItemOperation::Create,
        ItemOperation::Read,
        ItemOperation::Update,
        ItemOperation::Delete,
    ];

    /// The HTTP verb this operation is routed from.
    pub fn http_method(&self) -> &'static str {
        match self {
            ItemOperation::Create => "POST",
            ItemOperation::Read => "GET",
            ItemOperation::Update => "PUT",
            ItemOperation::Delete => "DELETE",
        }
    }

    /// Value of `Access-Control-Allow-Methods` for this operation.
    pub fn allowed_methods(&self) -> String {
        format!("{},OPTIONS", self.http_method())
    }

    /// Map an HTTP verb to its operation. `OPTIONS` and unknown verbs give `None`.
    pub fn from_http_method(method: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|operation| operation.http_method().eq_ignore_ascii_case(method))
    }
}

impl fmt::Display for ItemOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemOperation::Create => "create",
            ItemOperation::Read => "read",
            ItemOperation::Update => "update",
            ItemOperation::Delete => "delete",
        };
        f.write_str(name)
    }
}

impl FromStr for ItemOperation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|operation| operation.to_string().eq_ignore_ascii_case(s))
            .or_else(|| Self::from_http_method(s))
            .ok_or_else(|| format!("unknown operation '{}'", s))
    }
}

impl ItemRequest {
    /// Non-empty `id` path parameter.
    pub fn path_id(&self) -> Option<&str> {
        self.path_parameters
            .as_ref()
            .and_then(|params| params.get("id"))
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }

    /// Non-empty query string parameter.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get(name))
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// The request payload as a JSON object.
    ///
    /// Parses `body` when it is present and non-empty; otherwise the request's
    /// own top-level fields are the payload.
    pub fn payload_object(&self) -> ItemResult<Map<String, Value>> {
        match self.body.as_deref().filter(|body| !body.is_empty()) {
            Some(body) => match serde_json::from_str::<Value>(body) {
                Ok(Value::Object(object)) => Ok(object),
                Ok(_) => Err(ItemError::invalid_body("expected a JSON object")),
                Err(e) => Err(ItemError::invalid_body(e.to_string())),
            },
            None => Ok(self.extra.clone()),
        }
    }
}

impl ItemResponse {
    /// Parse the body back into JSON.
    pub fn json_body(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

impl<T: ItemTable> ItemOperationHandler<T> {
    /// Create a handler around a table handle.
    pub fn new(table: T, config: ServiceConfig) -> Self {
        Self { table, config }
    }

    /// Handle one request for the given operation.
    ///
    /// Never fails: every error is turned into a 4xx or 5xx response.
    pub async fn handle_operation(
        &self,
        operation: ItemOperation,
        request: ItemRequest,
    ) -> ItemResponse {
        let context = OperationContext {
            operation,
            request_id: uuid::Uuid::new_v4().to_string(),
        };

        info!(
            "Item handler processing {} on table '{}' (request: '{}')",
            operation,
            self.table.table_name(),
            context.request_id
        );

        let result = match operation {
            ItemOperation::Create => {
                super::handlers::create::handle_create(self, &request, &context).await
            }
            ItemOperation::Read => super::handlers::read::handle_read(self, &request, &context).await,
            ItemOperation::Update => {
                super::handlers::update::handle_update(self, &request, &context).await
            }
            ItemOperation::Delete => {
                super::handlers::delete::handle_delete(self, &request, &context).await
            }
        };

        match result {
            Ok(response) => {
                debug!(
                    "Item handler completed {} with status {} (request: '{}')",
                    operation, response.status_code, context.request_id
                );
                response
            }
            Err(e) => super::errors::create_error_response(&e, &context, &self.config),
        }
    }

    pub async fn handle_create(&self, request: ItemRequest) -> ItemResponse {
        self.handle_operation(ItemOperation::Create, request).await
    }

    pub async fn handle_read(&self, request: ItemRequest) -> ItemResponse {
        self.handle_operation(ItemOperation::Read, request).await
    }

    pub async fn handle_update(&self, request: ItemRequest) -> ItemResponse {
        self.handle_operation(ItemOperation::Update, request).await
    }

    pub async fn handle_delete(&self, request: ItemRequest) -> ItemResponse {
        self.handle_operation(ItemOperation::Delete, request).await
    }

    /// Answer a CORS preflight for an operation's route.
    pub fn handle_preflight(&self, operation: ItemOperation) -> ItemResponse {
        ItemResponse::json(200, operation, &self.config, &Value::Object(Map::new()))
    }

    /// The table handle.
    pub fn table(&self) -> &T {
        &self.table
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
