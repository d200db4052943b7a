//! Create handler

use crate::{
    error::ItemResult,
    item::{self, ItemPayload},
    operation_handler::core::{ItemOperationHandler, ItemRequest, ItemResponse, OperationContext},
    storage::ItemTable,
};
use log::debug;
use serde_json::json;

/// Handle create operations.
///
/// Validates `name` then `description`, generates the id and timestamps and
/// writes the item without an existence check.
pub async fn handle_create<T: ItemTable>(
    handler: &ItemOperationHandler<T>,
    request: &ItemRequest,
    context: &OperationContext,
) -> ItemResult<ItemResponse> {
    let payload = ItemPayload::from_object(&request.payload_object()?)?;
    let new_item = payload.into_new_item()?;

    let item = new_item.into_item(uuid::Uuid::new_v4().to_string(), item::now());
    let record = item.to_record()?;

    debug!(
        "Putting item {} into '{}' (request: '{}')",
        item.id,
        handler.table.table_name(),
        context.request_id
    );
    handler.table.put_item(record.clone()).await?;

    Ok(ItemResponse::created(
        context.operation,
        &handler.config,
        &json!({
            "message": "Item created successfully",
            "item": record,
        }),
    ))
}
