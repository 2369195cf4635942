//! Buffered file handler implementation
//!
//! Lines are appended to an in-memory buffer in front of a caller-supplied
//! writer (normally an open [`File`]). The buffer reaches the file when it
//! fills up, when the owner calls [`Handler::flush`] or
//! [`FileHandler::close`], when the handler is dropped, or when the
//! background flusher fires according to the [`FlushPolicy`].
//!
//! The buffer sits behind a mutex, so appends from any number of threads
//! and the background flush never interleave.

use crate::core::{Handler, LoggerError, Result};
use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Default size of the in-memory buffer (4 KiB)
pub const DEFAULT_BUFFER_CAPACITY: usize = 4 * 1024;

/// When the background flusher pushes the buffer to the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushPolicy {
    /// No background flush; the owner flushes or closes explicitly
    Manual,
    /// Flush a single time once the delay has elapsed after construction
    Once(Duration),
    /// Flush repeatedly at this interval until the handler is closed
    Every(Duration),
}

impl FlushPolicy {
    fn validate(&self) -> Result<()> {
        match self {
            FlushPolicy::Every(interval) if interval.is_zero() => Err(LoggerError::config(
                "FileHandler",
                "periodic flush interval must be greater than zero",
            )),
            _ => Ok(()),
        }
    }
}

type SharedWriter<W> = Arc<Mutex<Option<BufWriter<W>>>>;

struct Flusher {
    shutdown: Sender<()>,
    handle: JoinHandle<()>,
}

/// Buffered, mutex-guarded file sink
///
/// # Example
///
/// ```no_run
/// use loki_logger::handlers::{FileHandler, FlushPolicy};
/// use loki_logger::Handler;
/// use std::fs::File;
/// use std::time::Duration;
///
/// # fn main() -> loki_logger::Result<()> {
/// let file = File::create("app.log")?;
/// let handler = FileHandler::with_policy(file, FlushPolicy::Every(Duration::from_secs(1)))?;
/// handler.info("service started")?;
///
/// // pushes the tail of the buffer out and stops the flusher
/// handler.close()?;
/// # Ok(())
/// # }
/// ```
pub struct FileHandler<W: Write + Send + 'static = File> {
    writer: SharedWriter<W>,
    flusher: Mutex<Option<Flusher>>,
    policy: FlushPolicy,
}

impl FileHandler<File> {
    /// Buffer writes to `file` and flush once after `flush_delay`
    pub fn new(file: File, flush_delay: Duration) -> Result<Self> {
        Self::with_policy(file, FlushPolicy::Once(flush_delay))
    }
}

impl<W: Write + Send + 'static> FileHandler<W> {
    pub fn with_policy(writer: W, policy: FlushPolicy) -> Result<Self> {
        Self::with_capacity(DEFAULT_BUFFER_CAPACITY, writer, policy)
    }

    pub fn with_capacity(capacity: usize, writer: W, policy: FlushPolicy) -> Result<Self> {
        policy.validate()?;

        let writer: SharedWriter<W> =
            Arc::new(Mutex::new(Some(BufWriter::with_capacity(capacity, writer))));
        let flusher = Self::spawn_flusher(Arc::clone(&writer), policy)?;

        Ok(Self {
            writer,
            flusher: Mutex::new(flusher),
            policy,
        })
    }

    fn spawn_flusher(writer: SharedWriter<W>, policy: FlushPolicy) -> Result<Option<Flusher>> {
        let (delay, repeat) = match policy {
            FlushPolicy::Manual => return Ok(None),
            FlushPolicy::Once(delay) => (delay, false),
            FlushPolicy::Every(interval) => (interval, true),
        };

        let (shutdown, signal) = bounded::<()>(1);
        let handle = thread::Builder::new()
            .name("loki-file-flusher".to_string())
            .spawn(move || loop {
                match signal.recv_timeout(delay) {
                    Err(RecvTimeoutError::Timeout) => {
                        if let Err(e) = Self::flush_shared(&writer) {
                            eprintln!("[LOGGER ERROR] Background flush failed: {}", e);
                        }
                        if !repeat {
                            break;
                        }
                    }
                    // shutdown requested, or the sender is gone
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })
            .map_err(|e| LoggerError::io_operation("spawning file flusher", e))?;

        Ok(Some(Flusher { shutdown, handle }))
    }

    fn flush_shared(writer: &SharedWriter<W>) -> Result<()> {
        if let Some(writer) = writer.lock().as_mut() {
            writer
                .flush()
                .map_err(|e| LoggerError::io_operation("flushing log file", e))?;
        }
        Ok(())
    }

    /// Buffer `message` followed by a newline.
    ///
    /// Partial writes are retried until the whole line is taken. Fails with
    /// [`LoggerError::ShortWrite`] when the sink stops accepting bytes before
    /// that.
    pub fn append(&self, message: &str) -> Result<()> {
        let mut line = String::with_capacity(message.len() + 1);
        line.push_str(message);
        line.push('\n');
        let bytes = line.as_bytes();

        let mut guard = self.writer.lock();
        let writer = guard
            .as_mut()
            .ok_or_else(|| LoggerError::handler_closed("file"))?;

        let mut written = 0;
        while written < bytes.len() {
            match writer.write(&bytes[written..]) {
                Ok(0) => return Err(LoggerError::short_write(written, bytes.len())),
                Ok(n) => written += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Bytes currently held in the buffer
    pub fn buffered_len(&self) -> usize {
        self.writer.lock().as_ref().map_or(0, |w| w.buffer().len())
    }

    pub fn policy(&self) -> FlushPolicy {
        self.policy
    }

    pub fn is_closed(&self) -> bool {
        self.writer.lock().is_none()
    }

    /// Stop the background flusher, flush and release the writer.
    ///
    /// Later appends fail with [`LoggerError::HandlerClosed`]. Closing twice
    /// is a no-op.
    pub fn close(&self) -> Result<()> {
        let stopped = self.stop_flusher();

        let mut guard = self.writer.lock();
        let flushed = match guard.take() {
            Some(mut writer) => writer
                .flush()
                .map_err(|e| LoggerError::io_operation("flushing log file", e)),
            None => Ok(()),
        };

        stopped.and(flushed)
    }

    fn stop_flusher(&self) -> Result<()> {
        let Some(flusher) = self.flusher.lock().take() else {
            return Ok(());
        };

        // the thread may already have exited after a one-shot flush
        let _ = flusher.shutdown.try_send(());
        drop(flusher.shutdown);

        flusher.handle.join().map_err(|panic_info| {
            let msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            LoggerError::FlusherPanicked(msg)
        })
    }
}

impl<W: Write + Send + 'static> Handler for FileHandler<W> {
    fn debug(&self, output: &str) -> Result<()> {
        self.append(output)
    }

    fn info(&self, output: &str) -> Result<()> {
        self.append(output)
    }

    fn warn(&self, output: &str) -> Result<()> {
        self.append(output)
    }

    fn error(&self, output: &str) -> Result<()> {
        self.append(output)
    }

    fn flush(&self) -> Result<()> {
        Self::flush_shared(&self.writer)
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl<W: Write + Send + 'static> Drop for FileHandler<W> {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        if let Err(e) = self.close() {
            eprintln!("[LOGGER ERROR] Failed to flush file handler on drop: {}", e);
        }
    }
}
