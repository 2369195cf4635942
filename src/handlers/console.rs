//! Console handler implementation

use crate::core::{Handler, LogLevel, Result};
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::{self, Write};

/// Writes each message as one line on standard output
pub struct ConsoleHandler {
    use_colors: bool,
}

impl ConsoleHandler {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    pub fn uses_colors(&self) -> bool {
        self.use_colors
    }

    /// Apply the per-level color, leaving the text untouched
    #[cfg(feature = "console")]
    fn paint(&self, level: LogLevel, output: &str) -> String {
        match level.color_code() {
            Some(color) if self.use_colors => output.color(color).to_string(),
            _ => output.to_string(),
        }
    }

    #[cfg(not(feature = "console"))]
    fn paint(&self, _level: LogLevel, output: &str) -> String {
        output.to_string()
    }

    fn write_line(&self, level: LogLevel, output: &str) -> Result<()> {
        let line = self.paint(level, output);
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", line)?;
        Ok(())
    }
}

impl Default for ConsoleHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for ConsoleHandler {
    fn debug(&self, output: &str) -> Result<()> {
        self.write_line(LogLevel::Debug, output)
    }

    fn info(&self, output: &str) -> Result<()> {
        self.write_line(LogLevel::Info, output)
    }

    fn warn(&self, output: &str) -> Result<()> {
        self.write_line(LogLevel::Warn, output)
    }

    fn error(&self, output: &str) -> Result<()> {
        self.write_line(LogLevel::Error, output)
    }

    fn flush(&self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
