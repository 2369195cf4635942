//! File logging example
//!
//! Demonstrates the buffered file handler and its flush policies.
//!
//! Run with: cargo run --example file_logging

use loki_logger::prelude::*;
use std::fs::{self, OpenOptions};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Loki Logger - File Logging Example ===\n");

    let path = "application.log";
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    // Flush the buffer every 100ms from a background thread
    let handler: Arc<dyn Handler> = Arc::new(FileHandler::with_policy(
        file,
        FlushPolicy::Every(Duration::from_millis(100)),
    )?);

    let registry = Registry::new(EnablementFilter::allow_all());
    let db = registry.logger("app:db");
    let http = registry.logger("app:http");
    for logger in [&db, &http] {
        logger.set_shared_handler(Arc::clone(&handler));
    }

    println!("Logging to {}...", path);
    db.info(&["connection pool ready with %d connections".into(), 8.into()]);
    http.info(&["listening on %s:%d".into(), "0.0.0.0".into(), 8080.into()]);

    let workers: Vec<_> = (0..4)
        .map(|id| {
            let handler = Arc::clone(&handler);
            thread::spawn(move || {
                let worker = Logger::builder()
                    .name(format!("app:worker{}", id))
                    .filter(EnablementFilter::allow_all())
                    .shared_handler(handler)
                    .build();
                for job in 0..3 {
                    worker.info(&["finished job %d".into(), job.into()]);
                }
            })
        })
        .collect();
    for worker in workers {
        let _ = worker.join();
    }

    http.warn(&["slow request: %dms".into(), 1500.into()]);
    db.error(&["query failed: %s".into(), "deadlock detected".into()]);

    // Nothing is lost on shutdown: flush whatever the timer has not written yet
    db.flush()?;

    println!("\nLog file content:");
    print!("{}", fs::read_to_string(path)?);

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
