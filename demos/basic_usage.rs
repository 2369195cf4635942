//! Basic logger usage example
//!
//! Demonstrates named loggers, thresholds and the printf-style argument
//! list on the console handler.
//!
//! Run with: LOKI_ENV='app:*' cargo run --example basic_usage

use loki_logger::prelude::*;
use loki_logger::{debug, info, warn};

fn main() -> Result<()> {
    println!("=== Loki Logger - Basic Usage Example ===\n");

    // Compile LOKI_ENV once, reporting a malformed pattern instead of panicking
    loki_logger::init()?;

    let logger = Logger::new("app:basic");
    if !logger.is_enabled() {
        println!("'app:basic' is disabled; run with LOKI_ENV='app:*' to see output");
    }

    println!("1. Logging at different levels:");
    logger.set_level(LogLevel::Debug);
    debug!(logger, "This is a debug message");
    info!(logger, "This is an info message");
    warn!(logger, "This is a warning message");
    logger.error(&["This is an error message".into()]);

    println!("\n2. Formatting arguments:");
    info!(logger, "user %s has %d unread messages", "alice", 3);
    info!(logger, "ratio %.2f, hex %x, quoted %q", 0.4567, 255, "hi");
    logger.info(&[Value::from(42), "not a template".into()]);

    println!("\n3. Raising the threshold:");
    logger.set_level(LogLevel::Warn);
    println!("   Threshold set to WARN - debug and info won't show:");
    debug!(logger, "Debug message (hidden)");
    info!(logger, "Info message (hidden)");
    warn!(logger, "Warning message (visible)");

    println!("\n4. Root logger through the free functions:");
    loki_logger::set_time_format(TimeFormat::Disabled);
    loki_logger::info(&["root logger has no name prefix".into()]);

    let metrics = logger.metrics();
    println!(
        "\nemitted: {}, filtered: {}, failed: {}",
        metrics.emitted_count(),
        metrics.filtered_count(),
        metrics.failed_count()
    );

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
