//! # Item Handler
//!
//! Runs a single request event through one of the item handlers and prints the
//! response event. This is the local counterpart of the serverless entry point:
//! configuration and the table handle are set up once, then the event is
//! dispatched.
//!
//! ## Usage
//!
//! ```bash
//! export DYNAMODB_TABLE_NAME=items
//! echo '{"body": "{\"name\": \"Lamp\", \"description\": \"Desk lamp\"}"}' \
//!     | cargo run --bin item-handler -- create
//! echo '{"queryStringParameters": {"limit": "5"}}' | cargo run --bin item-handler -- read
//! ```
//!
//! The operation may be given by name (`create`, `read`, `update`, `delete`) or
//! by HTTP verb (`POST`, `GET`, `PUT`, `DELETE`); `OPTIONS <operation>` prints
//! the preflight response.
//!
//! The table is in-memory. Set `ITEMS_SEED_FILE` to a JSON array of items to
//! pre-populate it; after the call, the table contents are written back to the
//! same file so consecutive invocations see each other's writes.
//!
//! ## Exit Codes
//!
//! - `0`: a response was produced (whatever its status code)
//! - `1`: bad arguments, configuration, seed file or input event

use item_service::storage::{InMemoryTable, ItemTable, ScanRequest};
use item_service::{ItemOperation, ItemOperationHandler, ItemRequest, ServiceConfig};
use log::{error, info};
use serde_json::Value;
use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

/// Environment variable naming the JSON file that backs the in-memory table.
const SEED_FILE_VAR: &str = "ITEMS_SEED_FILE";

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(message) = run().await {
        error!("{}", message);
        eprintln!("Error: {}", message);
        process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().skip(1).collect();
    let (preflight, operation) = match args.as_slice() {
        [operation] => (false, operation.parse::<ItemOperation>()?),
        [verb, operation] if verb.eq_ignore_ascii_case("OPTIONS") => {
            (true, operation.parse::<ItemOperation>()?)
        }
        _ => {
            return Err(
                "usage: item-handler [OPTIONS] <create|read|update|delete> < event.json".to_string(),
            );
        }
    };

    let config = ServiceConfig::from_env().map_err(|e| e.to_string())?;
    info!("Starting item handler ({})", config);

    let seed_file = env::var(SEED_FILE_VAR).ok();
    let table = match &seed_file {
        Some(path) => load_table(&config.table_name, path)?,
        None => InMemoryTable::new(config.table_name.clone()),
    };
    let handler = ItemOperationHandler::new(table, config);

    let response = if preflight {
        handler.handle_preflight(operation)
    } else {
        let request = read_event()?;
        handler.handle_operation(operation, request).await
    };

    let output = serde_json::to_string_pretty(&response).map_err(|e| e.to_string())?;
    println!("{}", output);

    if let Some(path) = &seed_file {
        save_table(handler.table(), path).await?;
    }
    Ok(())
}

fn read_event() -> Result<ItemRequest, String> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| format!("failed to read event from stdin: {}", e))?;

    if input.trim().is_empty() {
        return Ok(ItemRequest::default());
    }
    serde_json::from_str(&input).map_err(|e| format!("invalid request event: {}", e))
}

fn load_table(table_name: &str, path: &str) -> Result<InMemoryTable, String> {
    let items = match fs::read_to_string(path) {
        Ok(content) if !content.trim().is_empty() => {
            serde_json::from_str::<Vec<Value>>(&content)
                .map_err(|e| format!("invalid seed file {}: {}", path, e))?
        }
        Ok(_) => Vec::new(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
        Err(e) => return Err(format!("failed to read seed file {}: {}", path, e)),
    };

    info!("Loaded {} items from {}", items.len(), path);
    InMemoryTable::with_items(table_name, items).map_err(|e| e.to_string())
}

async fn save_table(table: &InMemoryTable, path: &str) -> Result<(), String> {
    let mut items = Vec::new();
    let mut request = ScanRequest::with_limit(100);
    loop {
        let page = table.scan(request.clone()).await.map_err(|e| e.to_string())?;
        items.extend(page.items);
        match page.last_evaluated_key {
            Some(key) => request = request.starting_after(key),
            None => break,
        }
    }

    let content = serde_json::to_string_pretty(&items).map_err(|e| e.to_string())?;
    fs::write(path, content).map_err(|e| format!("failed to write seed file {}: {}", path, e))?;
    info!("Saved {} items to {}", items.len(), path);
    Ok(())
}
