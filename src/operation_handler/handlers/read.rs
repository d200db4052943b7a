//! Read handler: single-item fetch and paginated listing

use crate::{
    error::{ItemError, ItemResult},
    operation_handler::core::{ItemOperationHandler, ItemRequest, ItemResponse, OperationContext},
    storage::{ItemKey, ItemTable, ScanRequest},
};
use log::debug;
use serde_json::json;

/// Handle read operations.
///
/// With an `id` query parameter (or, failing that, an `id` path parameter) the
/// single item is returned; otherwise one page of a table scan.
pub async fn handle_read<T: ItemTable>(
    handler: &ItemOperationHandler<T>,
    request: &ItemRequest,
    context: &OperationContext,
) -> ItemResult<ItemResponse> {
    match request.query_param("id").or_else(|| request.path_id()) {
        Some(id) => handle_get(handler, id, context).await,
        None => handle_list(handler, request, context).await,
    }
}

async fn handle_get<T: ItemTable>(
    handler: &ItemOperationHandler<T>,
    id: &str,
    context: &OperationContext,
) -> ItemResult<ItemResponse> {
    let item = handler
        .table
        .get_item(&ItemKey::new(id))
        .await?
        .ok_or_else(|| ItemError::not_found(id))?;

    Ok(ItemResponse::ok(
        context.operation,
        &handler.config,
        &json!({ "item": item }),
    ))
}

async fn handle_list<T: ItemTable>(
    handler: &ItemOperationHandler<T>,
    request: &ItemRequest,
    context: &OperationContext,
) -> ItemResult<ItemResponse> {
    let limit = match request.query_param("limit") {
        Some(raw) => parse_limit(raw)?,
        None => handler.config.default_limit,
    };

    let mut scan = ScanRequest::with_limit(limit);
    if let Some(last_key) = request.query_param("last_key") {
        scan = scan.starting_after(ItemKey::new(last_key));
    }

    debug!(
        "Scanning '{}' with limit {} after {:?} (request: '{}')",
        handler.table.table_name(),
        limit,
        scan.exclusive_start_key,
        context.request_id
    );
    let page = handler.table.scan(scan).await?;

    Ok(ItemResponse::ok(
        context.operation,
        &handler.config,
        &json!({
            "count": page.items.len(),
            "items": page.items,
            "last_evaluated_key": page.last_evaluated_key,
            "scanned_count": page.scanned_count,
        }),
    ))
}

fn parse_limit(raw: &str) -> ItemResult<usize> {
    match raw.trim().parse::<usize>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(ItemError::InvalidLimit {
            value: raw.to_string(),
        }),
    }
}
