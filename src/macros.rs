//! Logging macros for printf-style log calls.
//!
//! Each argument is converted with `Value::from`, so any type with a
//! conversion into [`Value`](crate::Value) can be passed directly.
//!
//! # Examples
//!
//! ```
//! use loki_logger::prelude::*;
//! use loki_logger::info;
//!
//! let logger = Logger::builder()
//!     .name("app:http")
//!     .filter(EnablementFilter::allow_all())
//!     .build();
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port %d", port);
//!
//! let user_id = 42;
//! info!(logger, "User %d performed action: %s", user_id, "login");
//! ```

/// Build a `[Value; N]` argument array.
///
/// ```
/// use loki_logger::{args, Value};
///
/// let a = args!["%s=%d", "x", 1];
/// assert_eq!(a[2], Value::Int(1));
/// ```
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        [$($crate::Value::from($arg)),*]
    };
}

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use loki_logger::prelude::*;
/// # let logger = Logger::builder().filter(EnablementFilter::allow_all()).build();
/// use loki_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: %d", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:expr),+ $(,)?) => {
        $logger.log($level, &$crate::args![$($arg),+])
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use loki_logger::prelude::*;
/// # let logger = Logger::builder().filter(EnablementFilter::allow_all()).build();
/// # logger.set_level(LogLevel::Debug);
/// use loki_logger::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: %d", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg),+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg),+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use loki_logger::prelude::*;
/// # let logger = Logger::builder().filter(EnablementFilter::allow_all()).build();
/// use loki_logger::warn;
/// warn!(logger, "Low disk space");
/// warn!(logger, "Retry attempt %d of %d", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg),+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg),+)
    };
}

/// Log a fatal message and evaluate to `Option<`[`Fatal`](crate::Fatal)`>`,
/// `None` when the logger is gated out.
///
/// # Examples
///
/// ```no_run
/// # use loki_logger::prelude::*;
/// # let logger = Logger::new("app");
/// use loki_logger::fatal;
/// if let Some(fatal) = fatal!(logger, "Unable to recover from error: %s", "disk full") {
///     fatal.exit();
/// }
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $logger.fatal(&$crate::args![$($arg),+])
    };
}
