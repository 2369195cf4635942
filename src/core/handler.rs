//! Handler trait for log transport

use super::{error::Result, log_level::LogLevel};

/// Transports an already formatted line to a sink.
///
/// There is one entry point per severity tier so a sink may present the
/// tiers differently; it must not alter the text itself.
pub trait Handler: Send + Sync {
    fn debug(&self, output: &str) -> Result<()>;
    fn info(&self, output: &str) -> Result<()>;
    fn warn(&self, output: &str) -> Result<()>;
    fn error(&self, output: &str) -> Result<()>;

    /// Push buffered output to the sink
    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;

    /// Route `output` to the entry point for `level`; fatal travels as error.
    fn dispatch(&self, level: LogLevel, output: &str) -> Result<()> {
        match level.dispatch_level() {
            LogLevel::Debug => self.debug(output),
            LogLevel::Info => self.info(output),
            LogLevel::Warn => self.warn(output),
            LogLevel::Error | LogLevel::Fatal => self.error(output),
        }
    }
}
