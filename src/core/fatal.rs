//! Fatal emission signal

use std::process;

/// Exit status used by [`Fatal::exit`]
pub const FATAL_EXIT_CODE: i32 = 1;

/// Returned by a fatal-tier log call once the message has passed the gates
/// and been handed to the handler.
///
/// The logger never terminates the process on its own; the caller decides.
/// A gated-out fatal call returns `None` instead, so a disabled logger never
/// stops the process.
///
/// ```no_run
/// use loki_logger::Logger;
///
/// let logger = Logger::new("app:boot");
/// if let Some(fatal) = logger.fatal(&["config missing: %s".into(), "db.url".into()]) {
///     fatal.exit();
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("fatal: {message}")]
#[must_use = "a fatal log call does not stop the process; call `exit()` or handle the signal"]
pub struct Fatal {
    message: String,
}

impl Fatal {
    pub(crate) fn new(message: String) -> Self {
        Self { message }
    }

    /// The compiled line that was logged
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn exit_code(&self) -> i32 {
        FATAL_EXIT_CODE
    }

    /// Terminate the process with [`FATAL_EXIT_CODE`]. No destructors run.
    pub fn exit(self) -> ! {
        process::exit(FATAL_EXIT_CODE)
    }
}
