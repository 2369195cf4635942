//! Integration tests for the logger system
//!
//! These tests verify:
//! - Threshold and name gating of every level
//! - Root logger enablement
//! - Formatting and line prefixes
//! - Buffered file handler flush behaviour against a real file
//! - Custom formatters and handlers

use loki_logger::prelude::*;
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Handler that records every line it receives
#[derive(Default)]
struct CaptureHandler {
    lines: Mutex<Vec<(LogLevel, String)>>,
}

impl CaptureHandler {
    fn record(&self, level: LogLevel, output: &str) -> Result<()> {
        self.lines.lock().push((level, output.to_string()));
        Ok(())
    }

    fn messages(&self) -> Vec<String> {
        self.lines.lock().iter().map(|(_, m)| m.clone()).collect()
    }
}

impl Handler for CaptureHandler {
    fn debug(&self, output: &str) -> Result<()> {
        self.record(LogLevel::Debug, output)
    }

    fn info(&self, output: &str) -> Result<()> {
        self.record(LogLevel::Info, output)
    }

    fn warn(&self, output: &str) -> Result<()> {
        self.record(LogLevel::Warn, output)
    }

    fn error(&self, output: &str) -> Result<()> {
        self.record(LogLevel::Error, output)
    }

    fn name(&self) -> &str {
        "capture"
    }
}

fn capture_logger(name: &str, patterns: &str) -> (Logger, Arc<CaptureHandler>) {
    let capture = Arc::new(CaptureHandler::default());
    let logger = Logger::builder()
        .name(name)
        .filter(EnablementFilter::from_config(patterns).expect("valid patterns"))
        .time_format(TimeFormat::Disabled)
        .shared_handler(Arc::clone(&capture) as Arc<dyn Handler>)
        .build();
    (logger, capture)
}

#[test]
fn test_dispatch_iff_threshold_and_name_pass() {
    let emitting = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    for enabled in [true, false] {
        for threshold in LogLevel::ALL {
            for severity in emitting {
                let patterns = if enabled { "svc:*" } else { "other" };
                let (logger, capture) = capture_logger("svc:api", patterns);
                logger.set_level(threshold);

                logger.log(severity, &["probe".into()]);

                let dispatched = !capture.lines.lock().is_empty();
                let expected = enabled && severity.ordinal() >= threshold.ordinal();
                assert_eq!(
                    dispatched, expected,
                    "severity {} threshold {} enabled {}",
                    severity, threshold, enabled
                );
            }
        }
    }
}

#[test]
fn test_root_logger_always_enabled() {
    let root_only = Registry::new(EnablementFilter::root_only());
    assert!(root_only.root().is_enabled());
    assert!(!root_only.logger("app").is_enabled());

    let configured = Registry::from_config("app:xxx").expect("valid config");
    assert!(configured.root().is_enabled());
}

#[test]
fn test_pattern_matching_semantics() {
    let registry = Registry::from_config("app:xxx").expect("valid config");
    assert!(registry.logger("app:xxx").is_enabled());
    assert!(!registry.logger("app:x").is_enabled());
    // no implicit prefix matching: a trailing star is required
    assert!(!registry.logger("app:xxx1").is_enabled());

    let registry = Registry::from_config("app:xxx*").expect("valid config");
    assert!(registry.logger("app:xxx1").is_enabled());
    assert!(!registry.logger("app:x").is_enabled());
}

#[test]
fn test_malformed_pattern_fails_fast() {
    let err = Registry::from_config("app:*,app:[oops").unwrap_err();
    assert!(matches!(err, LoggerError::InvalidPattern { .. }));
    assert!(err.to_string().contains("app:[oops"));
}

#[test]
fn test_format_round_trip_with_prefixes() {
    let (logger, _) = capture_logger("app:fmt", "*");
    logger.set_time_format(TimeFormat::Rfc3339);

    let line = logger.compile(&["hi %s".into(), "x".into()]);
    let payload = line
        .split_once(" app:fmt ")
        .map(|(_, rest)| rest)
        .expect("timestamp and name prefixes");
    assert_eq!(payload, "hi x");
}

#[test]
fn test_empty_args_give_empty_payload() {
    let (logger, capture) = capture_logger("app:empty", "*");
    logger.info(&[]);
    assert_eq!(capture.messages(), vec!["app:empty"]);

    let (root, capture) = capture_logger("", "*");
    root.info(&[]);
    assert_eq!(capture.messages(), vec![""]);
}

#[test]
fn test_format_error_degrades_to_visible_output() {
    let (logger, capture) = capture_logger("app", "*");
    let err = std::io::Error::new(std::io::ErrorKind::Other, "test error");

    logger.error(&[Value::error(&err)]);
    logger.error(&["%d".into(), "not a number".into()]);

    assert_eq!(
        capture.messages(),
        vec![
            "app Logger format error with args [test error]",
            "app %!d(str=not a number)",
        ]
    );
}

#[test]
fn test_custom_formatter_keeps_gating() {
    let (logger, capture) = capture_logger("app", "*");
    logger.set_level(LogLevel::Warn);
    logger.set_formatter(|args: &[Value]| match args.first() {
        Some(v) => format!("Error {}", v),
        None => String::new(),
    });

    logger.info(&["below threshold".into()]);
    logger.warn(&["boom".into()]);

    assert_eq!(capture.messages(), vec!["app Error boom"]);
    assert_eq!(logger.metrics().filtered_count(), 1);
}

#[test]
fn test_file_handler_flushes_after_delay() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_path = temp_dir.path().join("test.log");
    let file = File::create(&log_path).expect("Failed to create log file");

    let logger = Logger::builder()
        .name("app:xxx")
        .filter(EnablementFilter::allow_all())
        .handler(FileHandler::new(file, Duration::from_millis(200)).expect("handler"))
        .build();

    logger.info(&["hello1".into()]);
    logger.info(&["hello2".into()]);

    let mut content = String::new();
    File::open(&log_path)
        .expect("reopen log file")
        .read_to_string(&mut content)
        .expect("read log file");
    assert_eq!(content, "");

    std::thread::sleep(Duration::from_millis(800));

    let content = fs::read_to_string(&log_path).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("app:xxx hello1"));
    assert!(lines[1].ends_with("app:xxx hello2"));
    assert!(content.ends_with('\n'));
}

#[test]
fn test_file_handler_no_loss_on_close() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_path = temp_dir.path().join("close.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .expect("open log file");

    let handler: Arc<FileHandler> = Arc::new(
        FileHandler::new(file, Duration::from_millis(10)).expect("handler"),
    );
    let logger = Logger::builder()
        .name("app:late")
        .filter(EnablementFilter::allow_all())
        .time_format(TimeFormat::Disabled)
        .shared_handler(Arc::clone(&handler) as Arc<dyn Handler>)
        .build();

    // the one-shot flush has long fired by now
    std::thread::sleep(Duration::from_millis(200));
    logger.warn(&["after the deferred flush".into()]);
    assert_eq!(fs::read_to_string(&log_path).unwrap(), "");

    handler.close().expect("close handler");
    assert_eq!(
        fs::read_to_string(&log_path).unwrap(),
        "app:late after the deferred flush\n"
    );

    // writes after close are transport errors, surfaced only in strict mode
    assert!(logger
        .try_log(LogLevel::Error, &["too late".into()])
        .unwrap_err()
        .is_transport());
    logger.error(&["too late".into()]);
    assert_eq!(logger.metrics().failed_count(), 2);
}

#[test]
fn test_file_handler_shared_between_loggers() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_path = temp_dir.path().join("shared.log");
    let file = File::create(&log_path).expect("create log file");
    let handler: Arc<dyn Handler> =
        Arc::new(FileHandler::with_policy(file, FlushPolicy::Manual).expect("handler"));

    let registry = Registry::from_config("db,http").expect("valid config");
    let db = registry.logger("db");
    let http = registry.logger("http");
    for logger in [&db, &http] {
        logger.set_time_format(TimeFormat::Disabled);
        logger.set_shared_handler(Arc::clone(&handler));
    }

    db.info(&["connected".into()]);
    http.info(&["listening on %d".into(), 8080.into()]);
    db.flush().expect("flush");

    assert_eq!(
        fs::read_to_string(&log_path).unwrap(),
        "db connected\nhttp listening on 8080\n"
    );
}

#[test]
fn test_fatal_is_a_signal_not_an_exit() {
    let (logger, capture) = capture_logger("app", "*");
    let fatal = logger
        .fatal(&["cannot continue: %s".into(), "no config".into()])
        .expect("enabled logger signals");

    assert_eq!(fatal.message(), "app cannot continue: no config");
    assert_eq!(fatal.exit_code(), loki_logger::FATAL_EXIT_CODE);
    assert_eq!(
        capture.lines.lock().as_slice(),
        &[(LogLevel::Error, "app cannot continue: no config".to_string())]
    );
}

#[test]
fn test_fatal_on_gated_out_logger_is_a_no_op() {
    let (logger, capture) = capture_logger("vendor", "app:*");
    assert!(logger.fatal(&["ignored".into()]).is_none());

    let (enabled, _) = capture_logger("app", "app");
    enabled.set_level(LogLevel::Fatal);
    assert!(enabled.fatal(&["at threshold".into()]).is_some());

    assert!(capture.lines.lock().is_empty());
    assert_eq!(logger.metrics().filtered_count(), 1);
}
