//! Quick start for errtrail
//!
//! Builds a root error, wraps it with more context, lets it pass through a
//! foreign error type and prints the full trace.
//!
//! Run with: `cargo run --example quick_start`

use errtrail::prelude::*;
use errtrail::{ops, MultiLinePrinter, TraceFormatConfig};

fn find_user(id: u64) -> Result<String> {
    if id == 0 {
        return Err(new!("user {} not found", id).with("table", "users"));
    }
    Ok(format!("user-{id}"))
}

fn load_profile(id: u64) -> Result<String> {
    let _scope = ops::begin("load_profile").set("user_id", id);
    find_user(id).map_err(|e| new!("load profile: {}", e))
}

// Stands in for a third-party layer that only keeps the text of an error.
fn legacy_call(id: u64) -> std::result::Result<String, std::io::Error> {
    load_profile(id).map_err(|e| std::io::Error::other(format!("legacy: {e}")))
}

fn main() {
    println!("1. Building and wrapping:");
    let err = load_profile(0).unwrap_err();
    println!("{err}");

    println!("\n2. Structured fields:");
    let mut fields = ContextMap::new();
    err.fill(&mut fields);
    for (key, value) in &fields {
        println!("  {key} = {value}");
    }

    println!("\n3. Through a foreign error:");
    let _scope = ops::begin("request");
    let legacy = legacy_call(0).map_err(wrap).unwrap_err();
    let recovered = legacy.chain().count();
    println!("{} ({recovered} links)", legacy.clean_message());

    println!("\n4. Full trace:");
    println!("{legacy:#}");

    println!("\n5. Compact trace, one line at a time:");
    let mut printer = MultiLinePrinter::with_config(&legacy, TraceFormatConfig::compact());
    let mut line = String::new();
    loop {
        line.clear();
        let more = printer.print(&mut line).unwrap_or(false);
        println!("  | {line}");
        if !more {
            break;
        }
    }

    println!("\n6. Hidden values:");
    let err = new!("login failed for {} with {}", "alice", hide("hunter2"));
    println!("{}", errtrail::hidden::clean(err.message()));
}
