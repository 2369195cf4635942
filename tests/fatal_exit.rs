//! Fatal termination, verified in a child process
//!
//! Each test re-runs this test binary filtered to itself with a marker in
//! the environment. The child logs a fatal message and exits; the parent
//! checks the exit status and the output.

use loki_logger::prelude::*;
use loki_logger::fatal;
use std::env;
use std::fs;
use std::process::{Command, Output};
use std::time::Duration;
use tempfile::TempDir;

const CHILD_MODE: &str = "LOKI_TEST_FATAL_CHILD";
const CHILD_LOG: &str = "LOKI_TEST_FATAL_LOG";

fn run_child(test_name: &str, mode: &str, extra_env: &[(&str, &str)]) -> Output {
    let exe = env::current_exe().expect("test binary path");
    let mut cmd = Command::new(exe);
    cmd.args([test_name, "--exact", "--nocapture", "--quiet", "--test-threads=1"])
        .env(CHILD_MODE, mode)
        .env("LOKI_ENV", "app:*")
        .env("NO_COLOR", "1");
    for (key, value) in extra_env {
        cmd.env(key, value);
    }
    cmd.output().expect("spawn child test process")
}

fn child_mode() -> Option<String> {
    env::var(CHILD_MODE).ok()
}

#[test]
fn fatal_to_console_exits_nonzero() {
    if child_mode().as_deref() == Some("console") {
        let logger = Logger::new("app:fatal");
        logger.set_handler(ConsoleHandler::with_colors(false));
        logger.set_time_format(TimeFormat::Disabled);
        if let Some(fatal) = fatal!(logger, "going down: %s", "disk full") {
            fatal.exit();
        }
        panic!("enabled logger returned no fatal signal");
    }

    let output = run_child("fatal_to_console_exits_nonzero", "console", &[]);
    assert_eq!(output.status.code(), Some(loki_logger::FATAL_EXIT_CODE));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let emitted: Vec<&str> = stdout.lines().filter(|l| l.contains("app:fatal")).collect();
    assert_eq!(emitted, vec!["app:fatal going down: disk full"]);
}

#[test]
fn fatal_flushes_file_before_exit() {
    if child_mode().as_deref() == Some("file") {
        let path = env::var(CHILD_LOG).expect("log path for child");
        let file = fs::File::create(path).expect("create child log");
        let logger = Logger::new("app:worker");
        logger.set_time_format(TimeFormat::Disabled);
        // far beyond the child's lifetime: only the fatal path can flush
        logger.set_handler(FileHandler::new(file, Duration::from_secs(3600)).expect("handler"));
        logger.info(&["starting".into()]);
        if let Some(fatal) = logger.fatal(&["lost connection to %s".into(), "db".into()]) {
            fatal.exit();
        }
        panic!("enabled logger returned no fatal signal");
    }

    let temp_dir = TempDir::new().expect("temp dir");
    let log_path = temp_dir.path().join("fatal.log");
    let log_path_str = log_path.to_str().expect("utf-8 path");

    let output = run_child(
        "fatal_flushes_file_before_exit",
        "file",
        &[(CHILD_LOG, log_path_str)],
    );
    assert_eq!(output.status.code(), Some(1));

    let content = fs::read_to_string(&log_path).expect("child log written");
    assert_eq!(content, "app:worker starting\napp:worker lost connection to db\n");
}

#[test]
fn fatal_on_filtered_logger_keeps_running() {
    if child_mode().as_deref() == Some("filtered") {
        let logger = Logger::new("vendor:noise");
        logger.set_handler(ConsoleHandler::with_colors(false));
        if let Some(fatal) = logger.fatal(&["should not print".into()]) {
            fatal.exit();
        }
        println!("still running");
        return;
    }

    let output = run_child("fatal_on_filtered_logger_keeps_running", "filtered", &[]);
    assert!(output.status.success(), "child exited with {:?}", output.status);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("still running"));
    assert!(!stdout.contains("should not print"));
}
