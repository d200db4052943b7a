//! Delete handler

use crate::{
    error::{ItemError, ItemResult},
    operation_handler::core::{ItemOperationHandler, ItemRequest, ItemResponse, OperationContext},
    storage::{Condition, ItemKey, ItemTable, KEY_ATTRIBUTE, StorageError},
};
use log::debug;
use serde_json::json;

/// Handle delete operations.
///
/// Deleting an absent id is always a 404, including when a concurrent delete
/// wins the race after the existence check.
pub async fn handle_delete<T: ItemTable>(
    handler: &ItemOperationHandler<T>,
    request: &ItemRequest,
    context: &OperationContext,
) -> ItemResult<ItemResponse> {
    let id = request.path_id().ok_or(ItemError::MissingId)?;
    let key = ItemKey::new(id);

    if handler.table.get_item(&key).await?.is_none() {
        return Err(ItemError::not_found(id));
    }

    debug!(
        "Deleting {} from '{}' (request: '{}')",
        key,
        handler.table.table_name(),
        context.request_id
    );
    let condition = Condition::AttributeExists(KEY_ATTRIBUTE.to_string());
    match handler.table.delete_item(&key, Some(&condition)).await {
        Ok(_) => {}
        Err(StorageError::ConditionalCheckFailed { .. }) => return Err(ItemError::not_found(id)),
        Err(e) => return Err(e.into()),
    }

    Ok(ItemResponse::ok(
        context.operation,
        &handler.config,
        &json!({
            "message": "Item deleted successfully",
            "deleted_item_id": id,
        }),
    ))
}
