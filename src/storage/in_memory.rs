//! In-memory item table.
//!
//! A thread-safe implementation of [`ItemTable`] backed by an ordered map behind
//! a tokio `RwLock`. It is used by the tests and the local `item-handler`
//! binary, and it defines the reference semantics of the table contract.
//!
//! # Scan order
//!
//! Records are scanned in ascending `id` order. The order is deterministic for
//! a fixed set of ids, but since ids are random UUIDs a page boundary moves
//! whenever records are inserted or removed before it.
//!
//! # Performance Characteristics
//!
//! * GET/PUT/UPDATE/DELETE: O(log n)
//! * SCAN: O(log n + limit)

use crate::storage::{
    Condition, ItemKey, ItemTable, ScanOutput, ScanRequest, StorageError, UpdateExpression,
    KEY_ATTRIBUTE,
};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Thread-safe in-memory table.
///
/// Cloning is cheap and every clone shares the same records.
#[derive(Clone, Debug)]
pub struct InMemoryTable {
    name: Arc<str>,
    // id -> record
    records: Arc<RwLock<BTreeMap<String, Map<String, Value>>>>,
}

impl InMemoryTable {
    /// Create an empty table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Arc::from(name.into()),
            records: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Create a table pre-populated with records.
    ///
    /// Every record must be an object with a string `id`.
    pub fn with_items(
        name: impl Into<String>,
        items: impl IntoIterator<Item = Value>,
    ) -> Result<Self, StorageError> {
        let mut records = BTreeMap::new();
        for item in items {
            let key = ItemKey::from_item(&item)?;
            records.insert(key.id().to_string(), into_object(item)?);
        }

        Ok(Self {
            name: Arc::from(name.into()),
            records: Arc::new(RwLock::new(records)),
        })
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Table statistics for debugging.
    pub async fn stats(&self) -> InMemoryTableStats {
        let records = self.records.read().await;
        InMemoryTableStats {
            item_count: records.len(),
            attribute_count: records.values().map(|record| record.len()).sum(),
        }
    }

    /// Remove all records.
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }
}

fn into_object(item: Value) -> Result<Map<String, Value>, StorageError> {
    match item {
        Value::Object(record) => Ok(record),
        other => Err(StorageError::invalid_data(format!(
            "item must be a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn check_condition(
    key: &ItemKey,
    condition: Option<&Condition>,
    current: Option<&Map<String, Value>>,
) -> Result<(), StorageError> {
    let Some(condition) = condition else {
        return Ok(());
    };
    let current = current.map(|record| Value::Object(record.clone()));
    if condition.evaluate(current.as_ref()) {
        Ok(())
    } else {
        Err(StorageError::conditional_check_failed(
            key.to_string(),
            condition.to_string(),
        ))
    }
}

impl ItemTable for InMemoryTable {
    fn table_name(&self) -> &str {
        &self.name
    }

    async fn get_item(&self, key: &ItemKey) -> Result<Option<Value>, StorageError> {
        let records = self.records.read().await;
        Ok(records.get(key.id()).cloned().map(Value::Object))
    }

    async fn put_item(&self, item: Value) -> Result<(), StorageError> {
        let key = ItemKey::from_item(&item)?;
        let record = into_object(item)?;

        let mut records = self.records.write().await;
        records.insert(key.id().to_string(), record);
        Ok(())
    }

    async fn update_item(
        &self,
        key: &ItemKey,
        update: &UpdateExpression,
    ) -> Result<Value, StorageError> {
        let mut records = self.records.write().await;
        check_condition(key, update.condition(), records.get(key.id()))?;

        let record = records.entry(key.id().to_string()).or_insert_with(|| {
            let mut record = Map::new();
            record.insert(KEY_ATTRIBUTE.to_string(), Value::String(key.id().to_string()));
            record
        });
        update.apply_to(record);
        // The key attribute is immutable.
        record.insert(KEY_ATTRIBUTE.to_string(), Value::String(key.id().to_string()));

        Ok(Value::Object(record.clone()))
    }

    async fn delete_item(
        &self,
        key: &ItemKey,
        condition: Option<&Condition>,
    ) -> Result<Option<Value>, StorageError> {
        let mut records = self.records.write().await;
        check_condition(key, condition, records.get(key.id()))?;
        Ok(records.remove(key.id()).map(Value::Object))
    }

    async fn scan(&self, request: ScanRequest) -> Result<ScanOutput, StorageError> {
        if request.limit == 0 {
            return Err(StorageError::invalid_data("scan limit must be at least 1"));
        }

        let records = self.records.read().await;
        let lower = match &request.exclusive_start_key {
            Some(key) => Bound::Excluded(key.id().to_string()),
            None => Bound::Unbounded,
        };

        let mut remaining = records.range((lower, Bound::Unbounded));
        let items: Vec<Value> = remaining
            .by_ref()
            .take(request.limit)
            .map(|(_, record)| Value::Object(record.clone()))
            .collect();

        let last_evaluated_key = if remaining.next().is_some() {
            items.last().map(ItemKey::from_item).transpose()?
        } else {
            None
        };

        Ok(ScanOutput {
            scanned_count: items.len(),
            items,
            last_evaluated_key,
        })
    }
}

/// Statistics about the current state of an in-memory table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryTableStats {
    /// Number of records
    pub item_count: usize,
    /// Total attributes across all records
    pub attribute_count: usize,
}
