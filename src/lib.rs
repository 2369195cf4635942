//! # Loki Logger
//!
//! A leveled logging library where every logger has a name, and only the
//! names allowed by the `LOKI_ENV` glob list get to speak.
//!
//! ## Features
//!
//! - **Leveled**: Debug, Info, Warn, Error and Fatal with a per-logger threshold
//! - **Name Filtering**: comma-separated glob patterns, compiled once
//! - **Pluggable**: swap the formatter or the handler of any logger at runtime
//! - **Buffered Files**: mutex-guarded file handler with one-shot or periodic flush
//! - **Thread Safe**: loggers and handlers can be shared across threads
//!
//! ```
//! use loki_logger::prelude::*;
//!
//! let registry = Registry::from_config("app:*").unwrap();
//! let logger = registry.logger("app:db");
//! logger.set_time_format(TimeFormat::Disabled);
//!
//! assert!(logger.is_enabled());
//! assert!(!registry.logger("vendor").is_enabled());
//! assert_eq!(logger.compile(&["pool size %d".into(), 8.into()]), "app:db pool size 8");
//! ```

pub mod core;
pub mod handlers;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        EnablementFilter, Fatal, Formatter, Handler, LogLevel, Logger, LoggerBuilder,
        LoggerError, LoggerMetrics, Registry, Result, StandardFormatter, TimeFormat, Value,
    };
    pub use crate::handlers::{ConsoleHandler, FileHandler, FlushPolicy};
}

pub use crate::core::registry::{
    debug, error, fatal, flush, global, info, init, init_with, root, set_formatter, set_handler,
    set_level, set_time_format, warn,
};
pub use crate::core::{
    EnablementFilter, Fatal, Formatter, Handler, LogLevel, Logger, LoggerBuilder, LoggerError,
    LoggerMetrics, Registry, Result, StandardFormatter, TimeFormat, Value, ENV_VAR,
    FATAL_EXIT_CODE, ROOT_LOGGER_NAME,
};
pub use handlers::{ConsoleHandler, FileHandler, FlushPolicy};
