//! Structured logging with serde
//!
//! Flattens an error chain into a [`ContextMap`] and emits it as a single
//! JSON log record.
//!
//! Run with: `cargo run --example serde_logging --features serde`

use errtrail::prelude::*;
use errtrail::ops;
use serde_json::json;

fn charge(order: u64, cents: u32) -> Result<()> {
    let _scope = ops::begin("charge").set("order", order);
    Err(new!("card declined: {}", hide("4111-1111")).with("amount_cents", cents))
}

fn checkout(order: u64) -> Result<()> {
    let _scope = ops::begin("checkout").set("cart_items", 3);
    charge(order, 1999).map_err(|e| new!("checkout {}: {}", order, e))
}

fn log_error(err: &Error) {
    let mut fields = ContextMap::new();
    err.fill(&mut fields);

    let record = json!({
        "level": "error",
        "message": err.clean_message(),
        "fields": fields,
    });
    match serde_json::to_string_pretty(&record) {
        Ok(text) => println!("{}", errtrail::hidden::clean(&text)),
        Err(e) => eprintln!("failed to serialize log record: {e}"),
    }
}

fn main() {
    if let Err(err) = checkout(42) {
        log_error(&err);
    }
}
