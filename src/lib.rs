//! Create, read, update and delete request handlers over a single item table.
//!
//! Each handler takes a gateway-style request event, validates the few fields
//! it needs, performs one or two table operations and returns a response event
//! with status code, headers and a JSON body. The table is injected, so the
//! same handlers run against a managed key-value store or the bundled
//! [`InMemoryTable`](storage::InMemoryTable).
//!
//! # Core Components
//!
//! - [`ItemOperationHandler`] - Dispatches the create/read/update/delete handlers
//! - [`ItemTable`](storage::ItemTable) - Trait for the backing table
//! - [`ServiceConfig`] - Table name, page size and response header settings
//!
//! # Quick Start
//!
//! ```rust
//! use item_service::{ItemOperationHandler, ItemRequest, ServiceConfig};
//! use item_service::storage::InMemoryTable;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServiceConfig::new("items");
//! let handler = ItemOperationHandler::new(InMemoryTable::new(&config.table_name), config);
//!
//! let created = handler
//!     .handle_create(ItemRequest::with_body(&json!({"name": "A", "description": "B"})))
//!     .await;
//! let id = created.json_body()?["item"]["id"].as_str().unwrap_or_default().to_string();
//!
//! let fetched = handler.handle_read(ItemRequest::with_query([("id", id)])).await;
//! assert_eq!(fetched.status_code, 200);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod item;
pub mod operation_handler;
pub mod storage;

pub use config::{ConfigError, ServiceConfig};
pub use error::{ItemError, ItemResult, ValidationError};
pub use item::{Item, ItemPatch, ItemPayload, NewItem};
pub use operation_handler::{
    ItemOperation, ItemOperationHandler, ItemRequest, ItemResponse, OperationContext,
};
