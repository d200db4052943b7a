//! Listing and pagination through the read handler.

mod common;

use common::{assert_error, body_of, create_handler, create_item, id_of};
use item_service::ItemRequest;
use item_service::storage::InMemoryTable;
use item_service::{ItemOperationHandler, ItemResponse, ServiceConfig};
use serde_json::{Value, json};
use std::collections::HashSet;

async fn seed(handler: &ItemOperationHandler<InMemoryTable>, count: usize) -> Vec<String> {
    let mut ids = Vec::with_capacity(count);
    for n in 0..count {
        let item = create_item(handler, &format!("item-{}", n), "seeded").await;
        ids.push(id_of(&item));
    }
    ids.sort();
    ids
}

fn page_ids(body: &Value) -> Vec<String> {
    body["items"]
        .as_array()
        .expect("items should be an array")
        .iter()
        .map(id_of)
        .collect()
}

async fn list(handler: &ItemOperationHandler<InMemoryTable>, query: &[(&str, &str)]) -> ItemResponse {
    let request = ItemRequest::with_query(query.iter().copied());
    handler.handle_read(request).await
}

#[tokio::test]
async fn test_list_empty_table() {
    let handler = create_handler();

    let response = list(&handler, &[]).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(
        body_of(&response),
        json!({
            "items": [],
            "count": 0,
            "last_evaluated_key": null,
            "scanned_count": 0,
        })
    );
}

#[tokio::test]
async fn test_list_first_page_has_continuation_key() {
    let handler = create_handler();
    let ids = seed(&handler, 5).await;

    let response = list(&handler, &[("limit", "2")]).await;

    assert_eq!(response.status_code, 200);
    let body = body_of(&response);
    assert_eq!(body["count"], 2);
    assert_eq!(body["scanned_count"], 2);
    assert_eq!(page_ids(&body), ids[..2]);
    assert_eq!(body["last_evaluated_key"], json!({"id": ids[1]}));
}

#[tokio::test]
async fn test_list_resumes_after_last_key() {
    let handler = create_handler();
    let ids = seed(&handler, 5).await;

    let first = body_of(&list(&handler, &[("limit", "2")]).await);
    let last_key = first["last_evaluated_key"]["id"].as_str().unwrap().to_string();

    let second = body_of(&list(&handler, &[("limit", "2"), ("last_key", last_key.as_str())]).await);

    assert_eq!(page_ids(&second), ids[2..4]);
    let overlap: HashSet<String> = page_ids(&first)
        .into_iter()
        .filter(|id| page_ids(&second).contains(id))
        .collect();
    assert!(overlap.is_empty());
}

#[tokio::test]
async fn test_walking_all_pages_visits_each_item_once() {
    let handler = create_handler();
    let ids = seed(&handler, 7).await;

    let mut seen = Vec::new();
    let mut last_key: Option<String> = None;
    let mut pages = 0;
    loop {
        let mut query = vec![("limit", "3".to_string())];
        if let Some(key) = &last_key {
            query.push(("last_key", key.clone()));
        }
        let response = handler.handle_read(ItemRequest::with_query(query)).await;
        assert_eq!(response.status_code, 200);

        let body = body_of(&response);
        seen.extend(page_ids(&body));
        pages += 1;

        match body["last_evaluated_key"]["id"].as_str() {
            Some(key) => last_key = Some(key.to_string()),
            None => break,
        }
        assert!(pages < 10, "pagination did not terminate");
    }

    assert_eq!(pages, 3);
    assert_eq!(seen, ids);
}

#[tokio::test]
async fn test_last_page_has_no_continuation_key() {
    let handler = create_handler();
    let ids = seed(&handler, 4).await;

    // A page that ends exactly at the last item
    let body = body_of(&list(&handler, &[("limit", "2"), ("last_key", ids[1].as_str())]).await);
    assert_eq!(page_ids(&body), ids[2..]);
    assert!(body["last_evaluated_key"].is_null());

    // A limit larger than the table
    let body = body_of(&list(&handler, &[("limit", "50")]).await);
    assert_eq!(body["count"], 4);
    assert!(body["last_evaluated_key"].is_null());
}

#[tokio::test]
async fn test_list_uses_default_limit() {
    let handler = create_handler();
    seed(&handler, 12).await;

    let body = body_of(&list(&handler, &[]).await);
    assert_eq!(body["count"], 10);
    assert!(body["last_evaluated_key"].is_object());
}

#[tokio::test]
async fn test_list_uses_configured_default_limit() {
    let handler = ItemOperationHandler::new(
        InMemoryTable::new("items"),
        ServiceConfig::new("items").with_default_limit(3),
    );
    seed(&handler, 5).await;

    let body = body_of(&list(&handler, &[]).await);
    assert_eq!(body["count"], 3);
}

#[tokio::test]
async fn test_list_rejects_invalid_limit() {
    let handler = create_handler();
    seed(&handler, 2).await;

    for raw in ["0", "-3", "abc", "2.5"] {
        let response = list(&handler, &[("limit", raw)]).await;
        assert_error(&response, 400, &format!("Invalid limit: {}", raw));
    }
}

#[tokio::test]
async fn test_unknown_last_key_resumes_in_key_order() {
    let handler = create_handler();
    let ids = seed(&handler, 3).await;

    // A key that was never stored still positions the scan
    let body = body_of(&list(&handler, &[("last_key", "0")]).await);
    assert_eq!(page_ids(&body), ids);

    let body = body_of(&list(&handler, &[("last_key", "~")]).await);
    assert_eq!(body["count"], 0);
    assert!(body["last_evaluated_key"].is_null());
}

#[tokio::test]
async fn test_id_query_takes_precedence_over_listing() {
    let handler = create_handler();
    let ids = seed(&handler, 3).await;

    let response = list(&handler, &[("id", ids[1].as_str()), ("limit", "1")]).await;

    assert_eq!(response.status_code, 200);
    let body = body_of(&response);
    assert_eq!(id_of(&body["item"]), ids[1]);
    assert!(body.get("items").is_none());
}
