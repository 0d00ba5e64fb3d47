//! Basic logger hierarchy example
//!
//! Demonstrates named loggers, level propagation, shared ring buffer output
//! and per-level statistics.
//!
//! Run with: cargo run --example basic_usage

use rust_logger_hierarchy::prelude::*;
use rust_logger_hierarchy::{info, warn};
use std::io::stdout;

fn main() -> Result<()> {
    println!("=== Rust Logger Hierarchy - Basic Usage Example ===\n");

    // One ring buffer on the root collects everything that propagates up
    let ring = AppenderHandle::new(RingBufferAppender::new(4096))
        .with_layout(TextLayout::new().with_timestamp_format(TimestampFormat::Omit));
    rust_logger_hierarchy::root().add(&ring);

    // Children may be created before their parents
    let client = rust_logger_hierarchy::lookup("net.http.client");
    let net = rust_logger_hierarchy::lookup("net");

    println!("1. Logging at different levels:");
    client.trace("This is a trace message")?;
    client.info("This is an info message")?;
    client.error("This is an error message")?;

    println!("2. Raising the level of a whole subtree:");
    net.propagate_level(LogLevel::Warn);
    client.info("Info message (hidden)")?;
    warn!(client, "Warning message from {} (visible)", client.name())?;

    println!("3. Sending a subtree somewhere else:");
    let net_only = AppenderHandle::new(RingBufferAppender::new(1024).with_separator(" | "));
    net.add(&net_only)
        .set_option(LoggerOptions::ADDITIVE, false, false);
    client.error("Only in the net buffer")?;

    let db = rust_logger_hierarchy::lookup("db");
    info!(db, "db still reaches the root buffer")?;

    println!("\n--- root buffer ---");
    ring.lock().print(&mut stdout())?;
    println!("\n--- net buffer ---");
    net_only.lock().print(&mut stdout())?;

    let stats = rust_logger_hierarchy::stats();
    println!("\n\n4. Delivered events per level:");
    for (level, count) in stats.iter().filter(|(_, count)| *count > 0) {
        println!("   {:7} {}", level, count);
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
