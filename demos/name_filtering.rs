//! Name filtering example
//!
//! Shows how the glob list decides which loggers speak. The same list is
//! what `LOKI_ENV` holds for the process-wide registry.
//!
//! Run with: cargo run --example name_filtering

use loki_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== Loki Logger - Name Filtering Example ===\n");

    let configs = ["", "app:*", "app:db,http:?x", "app:db*", "*:cache"];
    let names = ["app:db", "app:db:pool", "http:rx", "http:tx:slow", "user:cache", "vendor"];

    for config in configs {
        let registry = Registry::from_config(config)?;
        println!("LOKI_ENV={:?}", config);
        for name in names {
            let state = if registry.logger(name).is_enabled() {
                "enabled"
            } else {
                "disabled"
            };
            println!("  {:<14} {}", name, state);
        }
        println!("  {:<14} enabled (root)", "\"\"");
    }

    println!("\nA malformed pattern is reported up front:");
    match Registry::from_config("app:[oops") {
        Ok(_) => println!("  unexpectedly accepted"),
        Err(e) => println!("  {}", e),
    }

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
