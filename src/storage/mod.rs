//! Table abstraction for item records.
//!
//! The [`ItemTable`] trait is the contract the handlers hold against the backing
//! key-value store: a single table addressed by the string attribute `id`,
//! supporting get, put, partial update, delete and a paginated scan. Records
//! cross this boundary as JSON objects; the table knows nothing about item
//! validation or timestamps.
//!
//! # Example Usage
//!
//! ```rust
//! use item_service::storage::{InMemoryTable, ItemKey, ItemTable, ScanRequest};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let table = InMemoryTable::new("items");
//!
//! table.put_item(json!({"id": "1", "name": "Lamp"})).await?;
//! let item = table.get_item(&ItemKey::new("1")).await?;
//! assert!(item.is_some());
//!
//! let page = table.scan(ScanRequest::with_limit(10)).await?;
//! assert_eq!(page.items.len(), 1);
//! assert!(page.last_evaluated_key.is_none());
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod expression;
pub mod in_memory;

pub use errors::StorageError;
pub use expression::{Condition, RenderedUpdate, UpdateExpression};
pub use in_memory::{InMemoryTable, InMemoryTableStats};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::future::Future;

/// Name of the partition key attribute.
pub const KEY_ATTRIBUTE: &str = "id";

/// Primary key of an item record.
///
/// Serializes as `{"id": "..."}`, which is also the shape of a scan
/// continuation token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemKey {
    id: String,
}

impl ItemKey {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Extract the key from a record.
    pub fn from_item(item: &Value) -> Result<Self, StorageError> {
        match item.get(KEY_ATTRIBUTE) {
            Some(Value::String(id)) if !id.is_empty() => Ok(Self::new(id.clone())),
            Some(_) => Err(StorageError::invalid_key(format!(
                "attribute '{}' must be a non-empty string",
                KEY_ATTRIBUTE
            ))),
            None => Err(StorageError::invalid_key(format!(
                "missing key attribute '{}'",
                KEY_ATTRIBUTE
            ))),
        }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", KEY_ATTRIBUTE, self.id)
    }
}

/// Parameters of a scan page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    /// Maximum number of records to examine.
    pub limit: usize,
    /// Resume strictly after this key.
    pub exclusive_start_key: Option<ItemKey>,
}

impl ScanRequest {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            exclusive_start_key: None,
        }
    }

    pub fn starting_after(mut self, key: ItemKey) -> Self {
        self.exclusive_start_key = Some(key);
        self
    }
}

/// One page of a scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutput {
    pub items: Vec<Value>,
    /// Present only when records remain beyond this page.
    pub last_evaluated_key: Option<ItemKey>,
    /// Records the table examined to produce the page.
    pub scanned_count: usize,
}

/// Contract for the single-table key-value store behind the handlers.
///
/// Single-item operations must be atomic, including the condition check of
/// [`update_item`](Self::update_item) and [`delete_item`](Self::delete_item).
/// Scan order is backend defined and not guaranteed to be stable.
pub trait ItemTable: Send + Sync {
    /// Name of the underlying table, for logs.
    fn table_name(&self) -> &str;

    /// Fetch a record by key. `None` if it does not exist.
    fn get_item(
        &self,
        key: &ItemKey,
    ) -> impl Future<Output = Result<Option<Value>, StorageError>> + Send;

    /// Store a record, replacing any record with the same key.
    ///
    /// The record must be a JSON object with a string `id` attribute.
    fn put_item(&self, item: Value) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Apply a partial update and return the full record after the update.
    ///
    /// Fails with [`StorageError::ConditionalCheckFailed`] if the expression's
    /// condition does not hold. Without a condition, a missing record is
    /// created from the key and the assignments.
    fn update_item(
        &self,
        key: &ItemKey,
        update: &UpdateExpression,
    ) -> impl Future<Output = Result<Value, StorageError>> + Send;

    /// Remove a record and return it, if it existed.
    ///
    /// Fails with [`StorageError::ConditionalCheckFailed`] if a condition is
    /// given and does not hold.
    fn delete_item(
        &self,
        key: &ItemKey,
        condition: Option<&Condition>,
    ) -> impl Future<Output = Result<Option<Value>, StorageError>> + Send;

    /// Read one page of records.
    fn scan(
        &self,
        request: ScanRequest,
    ) -> impl Future<Output = Result<ScanOutput, StorageError>> + Send;
}
