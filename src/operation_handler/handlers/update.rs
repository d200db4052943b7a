//! Update handler

use crate::{
    error::{ItemError, ItemResult},
    item::{self, ItemPayload},
    operation_handler::core::{ItemOperationHandler, ItemRequest, ItemResponse, OperationContext},
    storage::{ItemKey, ItemTable, StorageError},
};
use log::debug;
use serde_json::{Value, json};

/// Handle update operations.
///
/// The id comes from the path, or from the body when the path has none. Only
/// supplied fields are written; `updated_at` is always refreshed, so an update
/// with no fields just bumps the timestamp.
pub async fn handle_update<T: ItemTable>(
    handler: &ItemOperationHandler<T>,
    request: &ItemRequest,
    context: &OperationContext,
) -> ItemResult<ItemResponse> {
    let payload = ItemPayload::from_object(&request.payload_object()?)?;

    let id = request
        .path_id()
        .map(str::to_string)
        .or_else(|| payload.id.clone().filter(|id| !id.is_empty()))
        .ok_or(ItemError::MissingId)?;
    let patch = payload.into_patch()?;
    let key = ItemKey::new(id.as_str());

    let existing = handler
        .table
        .get_item(&key)
        .await?
        .ok_or_else(|| ItemError::not_found(id.as_str()))?;

    let previous = existing
        .get("updated_at")
        .and_then(Value::as_str)
        .and_then(item::timestamp::parse);
    let update = patch.to_update_expression(item::next_updated_at(previous));

    let rendered = update.render();
    debug!(
        "Updating {} in '{}': {} (request: '{}')",
        key,
        handler.table.table_name(),
        rendered.update_expression,
        context.request_id
    );

    let updated = match handler.table.update_item(&key, &update).await {
        Ok(updated) => updated,
        // Deleted between the existence check and the write
        Err(StorageError::ConditionalCheckFailed { .. }) => return Err(ItemError::not_found(id)),
        Err(e) => return Err(e.into()),
    };

    Ok(ItemResponse::ok(
        context.operation,
        &handler.config,
        &json!({
            "message": "Item updated successfully",
            "item": updated,
        }),
    ))
}
