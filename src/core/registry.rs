//! Logger registry and the process-wide root logger
//!
//! A [`Registry`] owns one compiled [`EnablementFilter`] and a root logger,
//! and hands out named loggers that share the filter. Applications that
//! want explicit wiring create their own registry and pass it around.
//!
//! For convenience there is also one process-wide registry behind the free
//! functions [`debug`], [`info`], [`set_level`] and friends. It is built on
//! first use from `LOKI_ENV`, or earlier and with error reporting by calling
//! [`init`] at startup:
//!
//! ```no_run
//! fn main() -> loki_logger::Result<()> {
//!     loki_logger::init()?;
//!     loki_logger::info(&["service up on port %d".into(), 8080.into()]);
//!     Ok(())
//! }
//! ```

use super::{
    error::{LoggerError, Result},
    fatal::Fatal,
    filter::{EnablementFilter, ROOT_LOGGER_NAME},
    formatter::Formatter,
    handler::Handler,
    log_level::LogLevel,
    logger::Logger,
    timestamp::TimeFormat,
    value::Value,
};
use std::sync::{Arc, OnceLock};

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Enablement filter plus root logger
#[derive(Debug)]
pub struct Registry {
    filter: Arc<EnablementFilter>,
    root: Logger,
}

impl Registry {
    pub fn new(filter: EnablementFilter) -> Self {
        let filter = Arc::new(filter);
        let root = Logger::with_filter(ROOT_LOGGER_NAME, Arc::clone(&filter));
        Self { filter, root }
    }

    /// Compile the filter from `LOKI_ENV`
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(EnablementFilter::from_env()?))
    }

    /// Compile the filter from a comma-separated pattern list
    pub fn from_config(config: &str) -> Result<Self> {
        Ok(Self::new(EnablementFilter::from_config(config)?))
    }

    pub fn filter(&self) -> &Arc<EnablementFilter> {
        &self.filter
    }

    /// The always-enabled root logger
    pub fn root(&self) -> &Logger {
        &self.root
    }

    /// Create a named logger gated by this registry's filter
    pub fn logger(&self, name: impl Into<String>) -> Logger {
        Logger::with_filter(name, Arc::clone(&self.filter))
    }
}

/// Build the process-wide registry from `LOKI_ENV`.
///
/// Fails on a malformed pattern, or if the registry already exists.
pub fn init() -> Result<()> {
    init_with(Registry::from_env()?)
}

/// Install `registry` as the process-wide registry
pub fn init_with(registry: Registry) -> Result<()> {
    GLOBAL
        .set(registry)
        .map_err(|_| LoggerError::AlreadyInitialized)
}

/// The process-wide registry, built from `LOKI_ENV` on first use.
///
/// # Panics
///
/// When the registry has not been initialized yet and `LOKI_ENV` holds a
/// malformed pattern. Call [`init`] first to handle that as an error.
pub fn global() -> &'static Registry {
    GLOBAL.get_or_init(|| match Registry::from_env() {
        Ok(registry) => registry,
        Err(e) => panic!("invalid logger configuration: {}", e),
    })
}

/// The process-wide root logger
pub fn root() -> &'static Logger {
    global().root()
}

pub fn set_level(level: LogLevel) {
    root().set_level(level);
}

pub fn set_formatter<F: Formatter + 'static>(formatter: F) {
    root().set_formatter(formatter);
}

pub fn set_handler<H: Handler + 'static>(handler: H) {
    root().set_handler(handler);
}

pub fn set_time_format(time_format: TimeFormat) {
    root().set_time_format(time_format);
}

pub fn debug(args: &[Value]) {
    root().debug(args);
}

pub fn info(args: &[Value]) {
    root().info(args);
}

pub fn warn(args: &[Value]) {
    root().warn(args);
}

pub fn error(args: &[Value]) {
    root().error(args);
}

/// Fatal call on the root logger; `None` only below a `Fatal` threshold
pub fn fatal(args: &[Value]) -> Option<Fatal> {
    root().fatal(args)
}

/// Flush the root logger's handler.
///
/// The process-wide registry is never dropped, so a buffering handler bound
/// to it must be flushed before the process exits.
pub fn flush() -> Result<()> {
    root().flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_shares_filter() {
        let registry = Registry::from_config("app:*").unwrap();
        let http = registry.logger("app:http");
        let other = registry.logger("other");

        assert!(Arc::ptr_eq(http.filter(), registry.filter()));
        assert!(http.is_enabled());
        assert!(!other.is_enabled());
        assert!(registry.root().is_enabled());
        assert!(registry.root().is_root());
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        assert!(matches!(
            Registry::from_config("good,[bad"),
            Err(LoggerError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_global_is_stable() {
        let first = global() as *const Registry;
        let second = global() as *const Registry;
        assert_eq!(first, second);
        assert!(matches!(
            init_with(Registry::new(EnablementFilter::allow_all())),
            Err(LoggerError::AlreadyInitialized)
        ));
    }
}
