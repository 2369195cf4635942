//! Main logger implementation

use super::{
    error::Result,
    fatal::Fatal,
    filter::{EnablementFilter, ROOT_LOGGER_NAME},
    formatter::{Formatter, StandardFormatter},
    handler::Handler,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    registry,
    timestamp::TimeFormat,
    value::Value,
};
use crate::handlers::ConsoleHandler;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// A named logger with a threshold, a formatter and a handler.
///
/// All setters take `&self`; the mutable parts sit behind read-write locks so
/// a logger can be shared between threads and reconfigured while in use. An
/// emission works on a snapshot of the configuration taken when it starts.
pub struct Logger {
    name: String,
    level: RwLock<LogLevel>,
    formatter: RwLock<Arc<dyn Formatter>>,
    handler: RwLock<Arc<dyn Handler>>,
    time_format: RwLock<TimeFormat>,
    filter: Arc<EnablementFilter>,
    /// Metrics for observability (emitted, filtered, failed)
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Create a logger gated by the process-wide enablement filter
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_filter(name, Arc::clone(registry::global().filter()))
    }

    /// Create a logger gated by an explicit enablement filter
    #[must_use]
    pub fn with_filter(name: impl Into<String>, filter: Arc<EnablementFilter>) -> Self {
        Self {
            name: name.into(),
            level: RwLock::new(LogLevel::Info),
            formatter: RwLock::new(Arc::new(StandardFormatter)),
            handler: RwLock::new(Arc::new(ConsoleHandler::new())),
            time_format: RwLock::new(TimeFormat::default()),
            filter,
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_root(&self) -> bool {
        self.name == ROOT_LOGGER_NAME
    }

    pub fn level(&self) -> LogLevel {
        *self.level.read()
    }

    pub fn time_format(&self) -> TimeFormat {
        self.time_format.read().clone()
    }

    pub fn filter(&self) -> &Arc<EnablementFilter> {
        &self.filter
    }

    /// The handler currently bound to this logger
    pub fn handler(&self) -> Arc<dyn Handler> {
        Arc::clone(&self.handler.read())
    }

    /// Whether this logger's name passes the enablement filter
    pub fn is_enabled(&self) -> bool {
        self.filter.is_enabled(&self.name)
    }

    /// Whether a message at `level` would reach the handler
    pub fn enabled_for(&self, level: LogLevel) -> bool {
        level.should_emit(self.level()) && self.is_enabled()
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.level.write() = level;
    }

    pub fn set_formatter<F: Formatter + 'static>(&self, formatter: F) {
        self.set_shared_formatter(Arc::new(formatter));
    }

    pub fn set_shared_formatter(&self, formatter: Arc<dyn Formatter>) {
        *self.formatter.write() = formatter;
    }

    pub fn set_handler<H: Handler + 'static>(&self, handler: H) {
        self.set_shared_handler(Arc::new(handler));
    }

    /// Bind a handler that may also be used elsewhere.
    ///
    /// The previous handler is flushed before it is released.
    pub fn set_shared_handler(&self, handler: Arc<dyn Handler>) {
        let previous = std::mem::replace(&mut *self.handler.write(), handler);
        if let Err(e) = previous.flush() {
            eprintln!(
                "[LOGGER ERROR] Failed to flush replaced handler '{}': {}",
                previous.name(),
                e
            );
        }
    }

    pub fn set_time_format(&self, time_format: TimeFormat) {
        *self.time_format.write() = time_format;
    }

    /// Render the final line: `[timestamp] [name] message`, each prefix
    /// present only when configured.
    pub fn compile(&self, args: &[Value]) -> String {
        let formatter = Arc::clone(&self.formatter.read());
        let time_format = self.time_format();
        self.compile_with(formatter.as_ref(), &time_format, args)
    }

    fn compile_with(
        &self,
        formatter: &dyn Formatter,
        time_format: &TimeFormat,
        args: &[Value],
    ) -> String {
        let message = formatter.format(args);

        let mut line = String::new();
        if let Some(ts) = time_format.now() {
            line.push_str(&ts);
        }
        if !self.is_root() {
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(&self.name);
        }

        if line.is_empty() {
            return message;
        }
        if !message.is_empty() {
            line.push(' ');
            line.push_str(&message);
        }
        line
    }

    /// Emit and report the transport outcome.
    ///
    /// Returns `Ok(false)` when the threshold or the enablement filter
    /// rejected the message, `Ok(true)` once the handler accepted it.
    pub fn try_log(&self, level: LogLevel, args: &[Value]) -> Result<bool> {
        if !self.enabled_for(level) {
            self.metrics.record_filtered();
            return Ok(false);
        }

        let formatter = Arc::clone(&self.formatter.read());
        let handler = Arc::clone(&self.handler.read());
        let time_format = self.time_format();

        let line = self.compile_with(formatter.as_ref(), &time_format, args);
        match handler.dispatch(level, &line) {
            Ok(()) => {
                self.metrics.record_emitted();
                Ok(true)
            }
            Err(e) => {
                self.metrics.record_failed();
                Err(e)
            }
        }
    }

    /// Best-effort emission: transport failures never reach the caller
    pub fn log(&self, level: LogLevel, args: &[Value]) {
        if let Err(e) = self.try_log(level, args) {
            self.report_failure(&e);
        }
    }

    fn report_failure(&self, error: &dyn fmt::Display) {
        let failed = self.metrics.failed_count();

        // Alert on first failure and periodically thereafter
        if failed == 1 || failed % 1000 == 0 {
            eprintln!(
                "[LOGGER WARNING] Logger '{}' failed to write {} message(s); latest error: {}",
                self.name, failed, error
            );
        }
    }

    #[inline]
    pub fn debug(&self, args: &[Value]) {
        self.log(LogLevel::Debug, args);
    }

    #[inline]
    pub fn info(&self, args: &[Value]) {
        self.log(LogLevel::Info, args);
    }

    #[inline]
    pub fn warn(&self, args: &[Value]) {
        self.log(LogLevel::Warn, args);
    }

    #[inline]
    pub fn error(&self, args: &[Value]) {
        self.log(LogLevel::Error, args);
    }

    /// Emit once on the error tier, flush, and hand back a [`Fatal`] signal.
    ///
    /// The message goes through the same gates as any other. When they reject
    /// it nothing is formatted and `None` is returned: a disabled logger's
    /// fatal call is a no-op.
    #[must_use = "a fatal log call does not stop the process; call `exit()` on the signal"]
    pub fn fatal(&self, args: &[Value]) -> Option<Fatal> {
        if !self.enabled_for(LogLevel::Fatal) {
            self.metrics.record_filtered();
            return None;
        }

        let formatter = Arc::clone(&self.formatter.read());
        let handler = Arc::clone(&self.handler.read());
        let time_format = self.time_format();
        let line = self.compile_with(formatter.as_ref(), &time_format, args);

        match handler.dispatch(LogLevel::Fatal, &line) {
            Ok(()) => {
                self.metrics.record_emitted();
            }
            Err(e) => {
                self.metrics.record_failed();
                self.report_failure(&e);
            }
        }
        // the caller is likely to exit without running destructors
        if let Err(e) = handler.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush after fatal message: {}", e);
        }

        Some(Fatal::new(line))
    }

    pub fn flush(&self) -> Result<()> {
        self.handler().flush()
    }

    /// Get the logger metrics for detailed observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use loki_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .name("app:http")
    ///     .level(LogLevel::Debug)
    ///     .time_format(TimeFormat::Disabled)
    ///     .filter(EnablementFilter::from_config("app:*").unwrap())
    ///     .build();
    ///
    /// assert_eq!(logger.compile(&["%d-%d".into(), 1.into(), 2.into()]), "app:http 1-2");
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("handler", &self.handler.read().name())
            .field("time_format", &self.time_format())
            .finish()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.handler.get_mut().flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }
    }
}

/// Builder for constructing Logger with a fluent API
pub struct LoggerBuilder {
    name: String,
    level: LogLevel,
    formatter: Arc<dyn Formatter>,
    handler: Option<Arc<dyn Handler>>,
    time_format: TimeFormat,
    filter: Option<Arc<EnablementFilter>>,
}

impl LoggerBuilder {
    /// Create a new builder for a root logger with default settings
    pub fn new() -> Self {
        Self {
            name: ROOT_LOGGER_NAME.to_string(),
            level: LogLevel::Info,
            formatter: Arc::new(StandardFormatter),
            handler: None,
            time_format: TimeFormat::default(),
            filter: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter<F: Formatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn handler<H: Handler + 'static>(mut self, handler: H) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn shared_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handler = Some(handler);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn time_format(mut self, time_format: TimeFormat) -> Self {
        self.time_format = time_format;
        self
    }

    /// Gate the logger with this filter instead of the process-wide one
    #[must_use = "builder methods return a new value"]
    pub fn filter(mut self, filter: EnablementFilter) -> Self {
        self.filter = Some(Arc::new(filter));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn shared_filter(mut self, filter: Arc<EnablementFilter>) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let filter = self
            .filter
            .unwrap_or_else(|| Arc::clone(registry::global().filter()));
        let handler = self
            .handler
            .unwrap_or_else(|| Arc::new(ConsoleHandler::new()));

        Logger {
            name: self.name,
            level: RwLock::new(self.level),
            formatter: RwLock::new(self.formatter),
            handler: RwLock::new(handler),
            time_format: RwLock::new(self.time_format),
            filter,
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
