//! Framework-agnostic item operation handler.
//!
//! This module turns gateway-style request events into response events for the
//! four item operations. Transport (HTTP routing, serverless runtime, CLI) is
//! left to the caller.
//!
//! # Key Types
//!
//! - [`ItemOperationHandler`] - Owns the table handle and dispatches operations
//! - [`ItemRequest`] - Request event (`body`, `pathParameters`, `queryStringParameters`)
//! - [`ItemResponse`] - Response event (`statusCode`, `headers`, `body`)
//!
//! # Examples
//!
//! ```rust
//! use item_service::operation_handler::{ItemOperationHandler, ItemRequest};
//! use item_service::storage::InMemoryTable;
//! use item_service::ServiceConfig;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let handler = ItemOperationHandler::new(InMemoryTable::new("items"), ServiceConfig::new("items"));
//!
//! let request = ItemRequest::with_body(&json!({"name": "Lamp", "description": "Desk lamp"}));
//! let response = handler.handle_create(request).await;
//! assert_eq!(response.status_code, 201);
//! # Ok(())
//! # }
//! ```

mod builders;
mod core;
mod errors;
mod handlers;

pub use core::{ItemOperation, ItemOperationHandler, ItemRequest, ItemResponse, OperationContext};

pub use builders::*;

pub use errors::create_error_response;
