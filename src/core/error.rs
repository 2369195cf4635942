//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {source}")]
    IoOperation {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The sink accepted fewer bytes than requested
    #[error("short write: {written} of {expected} bytes accepted")]
    ShortWrite { written: usize, expected: usize },

    /// A logger name pattern could not be compiled
    #[error("failed to compile logger pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// The process-wide registry was set up twice
    #[error("global logger registry already initialized")]
    AlreadyInitialized,

    /// Write attempted after the handler was closed
    #[error("handler '{0}' is closed")]
    HandlerClosed(String),

    /// The background flusher thread panicked
    #[error("flusher thread panicked: {0}")]
    FlusherPanicked(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(operation: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            source,
        }
    }

    pub fn short_write(written: usize, expected: usize) -> Self {
        LoggerError::ShortWrite { written, expected }
    }

    pub fn invalid_pattern(pattern: impl Into<String>, source: globset::Error) -> Self {
        LoggerError::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn handler_closed(name: impl Into<String>) -> Self {
        LoggerError::HandlerClosed(name.into())
    }

    /// Whether the error came from the sink rather than from configuration
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            LoggerError::Io(_)
                | LoggerError::IoOperation { .. }
                | LoggerError::ShortWrite { .. }
                | LoggerError::HandlerClosed(_)
                | LoggerError::FlusherPanicked(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use globset::GlobBuilder;
    use std::error::Error as _;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::short_write(3, 10);
        assert!(matches!(err, LoggerError::ShortWrite { written: 3, expected: 10 }));

        let err = LoggerError::config("EnablementFilter", "empty pattern");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::handler_closed("file");
        assert!(matches!(err, LoggerError::HandlerClosed(_)));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::short_write(3, 10);
        assert_eq!(err.to_string(), "short write: 3 of 10 bytes accepted");

        let err = LoggerError::config("EnablementFilter", "empty pattern");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for EnablementFilter: empty pattern"
        );

        assert_eq!(
            LoggerError::AlreadyInitialized.to_string(),
            "global logger registry already initialized"
        );
    }

    #[test]
    fn test_invalid_pattern_keeps_source() {
        let glob_err = GlobBuilder::new("app:[").build().unwrap_err();
        let err = LoggerError::invalid_pattern("app:[", glob_err.clone());

        assert!(err.to_string().contains("app:["));
        assert_eq!(err.source().unwrap().to_string(), glob_err.to_string());
        assert!(!err.is_transport());
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("flushing log file", io_err);

        assert!(err.to_string().contains("flushing log file"));
        assert!(err.is_transport());
    }
}
