//! Core logger types and traits

pub mod error;
pub mod fatal;
pub mod filter;
pub mod formatter;
pub mod handler;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod registry;
pub mod template;
pub mod timestamp;
pub mod value;

pub use error::{LoggerError, Result};
pub use fatal::{Fatal, FATAL_EXIT_CODE};
pub use filter::{EnablementFilter, ENV_VAR, ROOT_LOGGER_NAME};
pub use formatter::{Formatter, StandardFormatter};
pub use handler::Handler;
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use registry::Registry;
pub use timestamp::TimeFormat;
pub use value::Value;
