//! Demo binary: wires the webhook handler to an in-memory store and drives
//! a scripted conversation through it, logging each exchange.
//!
//! ```bash
//! RUST_LOG=info cargo run      # Compact logs
//! RUST_LOG=debug cargo run     # Full command payloads
//! ```

use eatery::store::MemoryStore;
use eatery::webhook::{WebhookHandler, WebhookRequest};
use serde_json::json;
use session_actor::tracing::setup_tracing;
use std::sync::Arc;
use tracing::info;

const SESSION: &str = "projects/eatery-demo/agent/sessions/demo-1/contexts/ongoing-order";

fn request(
    intent: &str,
    query_text: &str,
    parameters: serde_json::Value,
) -> Result<WebhookRequest, serde_json::Error> {
    serde_json::from_value(json!({
        "queryResult": {
            "intent": { "displayName": intent },
            "parameters": parameters,
            "outputContexts": [ { "name": SESSION } ],
            "queryText": query_text,
        }
    }))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    info!("Starting eatery webhook demo");

    let store = Arc::new(MemoryStore::with_menu([
        ("samosa", 1.5),
        ("chhole", 4.0),
        ("pav bhaji", 5.5),
        ("masala dosa", 6.0),
        ("mango lassi", 2.0),
    ]));
    let handler = WebhookHandler::new(store.clone());

    let conversation = [
        request(
            "order.add - context: ongoing-order",
            "I'd like two samosa and a mango lassi",
            json!({ "food-item": ["samosa", "mango lassi"], "number": [2.0, 1.0] }),
        )?,
        request(
            "order.add - context: ongoing-order",
            "make that three samosa",
            json!({ "food-item": ["samosa"], "number": [3.0] }),
        )?,
        request(
            "order.remove - context: ongoing-order",
            "drop the mango lassi",
            json!({ "food-item": ["mango lassi"], "number": [] }),
        )?,
        request("order.complete - context: ongoing-order", "that's all", json!({}))?,
        request(
            "track.order - context: ongoing-tracking",
            "where is my order 1?",
            json!({ "order_id": 1.0 }),
        )?,
    ];

    for call in &conversation {
        let response = handler.handle(call).await;
        info!(
            query = %call.query_result.query_text,
            reply = %response.fulfillment_text,
            "exchange"
        );
    }

    // A delivery update lands out of band, then the customer asks again.
    store.set_status(1, "delivered");
    let tracked = handler
        .handle(&request(
            "track.order - context: ongoing-tracking",
            "and now?",
            json!({ "order_id": 1.0 }),
        )?)
        .await;
    info!(reply = %tracked.fulfillment_text, "exchange");

    info!("Demo completed");
    Ok(())
}
