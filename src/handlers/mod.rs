//! Handler implementations

pub mod console;
pub mod file;

pub use console::ConsoleHandler;
pub use file::{FileHandler, FlushPolicy, DEFAULT_BUFFER_CAPACITY};

pub use crate::core::Handler;
