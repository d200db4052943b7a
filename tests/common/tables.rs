//! Table doubles for failure and race scenarios.

use item_service::storage::{
    Condition, InMemoryTable, ItemKey, ItemTable, ScanOutput, ScanRequest, StorageError,
    UpdateExpression,
};
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A table whose every operation fails as if the backend were down.
#[derive(Debug, Clone)]
pub struct UnavailableTable {
    pub message: String,
}

impl UnavailableTable {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn error(&self) -> StorageError {
        StorageError::unavailable(self.message.clone())
    }
}

impl ItemTable for UnavailableTable {
    fn table_name(&self) -> &str {
        "unavailable"
    }

    async fn get_item(&self, _key: &ItemKey) -> Result<Option<Value>, StorageError> {
        Err(self.error())
    }

    async fn put_item(&self, _item: Value) -> Result<(), StorageError> {
        Err(self.error())
    }

    async fn update_item(
        &self,
        _key: &ItemKey,
        _update: &UpdateExpression,
    ) -> Result<Value, StorageError> {
        Err(self.error())
    }

    async fn delete_item(
        &self,
        _key: &ItemKey,
        _condition: Option<&Condition>,
    ) -> Result<Option<Value>, StorageError> {
        Err(self.error())
    }

    async fn scan(&self, _request: ScanRequest) -> Result<ScanOutput, StorageError> {
        Err(self.error())
    }
}

/// An in-memory table where the item disappears right after every read,
/// as if a concurrent delete landed between the existence check and the write.
#[derive(Debug, Clone)]
pub struct VanishingTable {
    pub inner: InMemoryTable,
}

impl ItemTable for VanishingTable {
    fn table_name(&self) -> &str {
        self.inner.table_name()
    }

    async fn get_item(&self, key: &ItemKey) -> Result<Option<Value>, StorageError> {
        let item = self.inner.get_item(key).await?;
        self.inner.delete_item(key, None).await?;
        Ok(item)
    }

    async fn put_item(&self, item: Value) -> Result<(), StorageError> {
        self.inner.put_item(item).await
    }

    async fn update_item(
        &self,
        key: &ItemKey,
        update: &UpdateExpression,
    ) -> Result<Value, StorageError> {
        self.inner.update_item(key, update).await
    }

    async fn delete_item(
        &self,
        key: &ItemKey,
        condition: Option<&Condition>,
    ) -> Result<Option<Value>, StorageError> {
        self.inner.delete_item(key, condition).await
    }

    async fn scan(&self, request: ScanRequest) -> Result<ScanOutput, StorageError> {
        self.inner.scan(request).await
    }
}

/// An in-memory table that counts write calls.
#[derive(Debug, Clone)]
pub struct CountingTable {
    pub inner: InMemoryTable,
    pub writes: Arc<AtomicUsize>,
}

impl CountingTable {
    pub fn new(inner: InMemoryTable) -> Self {
        Self {
            inner,
            writes: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl ItemTable for CountingTable {
    fn table_name(&self) -> &str {
        self.inner.table_name()
    }

    async fn get_item(&self, key: &ItemKey) -> Result<Option<Value>, StorageError> {
        self.inner.get_item(key).await
    }

    async fn put_item(&self, item: Value) -> Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.put_item(item).await
    }

    async fn update_item(
        &self,
        key: &ItemKey,
        update: &UpdateExpression,
    ) -> Result<Value, StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.update_item(key, update).await
    }

    async fn delete_item(
        &self,
        key: &ItemKey,
        condition: Option<&Condition>,
    ) -> Result<Option<Value>, StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_item(key, condition).await
    }

    async fn scan(&self, request: ScanRequest) -> Result<ScanOutput, StorageError> {
        self.inner.scan(request).await
    }
}
