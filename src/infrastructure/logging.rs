//! Centralized file-based logging system
//!
//! Writes logs to files under the configured log directory, separated by type:
//! - main/ - All logs (JSON)
//! - error/ - Error and warning logs only
//! - generate/ - Generation pipeline logs
//! - bench/ - Benchmark harness logs
//! - api/ - Status endpoint logs

use std::fs;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
    EnvFilter,
};

const LOG_TYPES: [&str; 5] = ["main", "error", "generate", "bench", "api"];

/// Initialize centralized file logging
///
/// Creates the log directory tree and sets up file appenders for each log
/// type. The returned guards must be kept alive for the duration of the
/// program or buffered lines are lost.
pub fn init_logging(logs_dir: &Path) -> io::Result<Vec<WorkerGuard>> {
    for log_type in LOG_TYPES {
        fs::create_dir_all(logs_dir.join(log_type))?;
    }

    let mut guards = Vec::new();
    let mut appender = |name: &str| {
        let (writer, guard) = create_appender(logs_dir, name);
        guards.push(guard);
        writer
    };

    let main_appender = appender("main");
    let error_appender = appender("error");
    let generate_appender = appender("generate");
    let bench_appender = appender("bench");
    let api_appender = appender("api");

    // Main log - all logs
    let main_layer = tracing_subscriber::fmt::layer()
        .with_writer(main_appender)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .json();

    // Error log - ERROR and WARN only
    let error_layer = tracing_subscriber::fmt::layer()
        .with_writer(error_appender)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_filter(tracing_subscriber::filter::LevelFilter::WARN);

    let generate_layer = tracing_subscriber::fmt::layer()
        .with_writer(generate_appender)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_filter(tracing_subscriber::filter::filter_fn(|metadata| {
            let target = metadata.target();
            target.contains("generate")
                || target.contains("pipeline")
                || target.contains("artifacts")
                || target.contains("phf")
                || target.contains("source")
        }));

    let bench_layer = tracing_subscriber::fmt::layer()
        .with_writer(bench_appender)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_filter(tracing_subscriber::filter::filter_fn(|metadata| {
            metadata.target().contains("bench")
        }));

    let api_layer = tracing_subscriber::fmt::layer()
        .with_writer(api_appender)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_filter(tracing_subscriber::filter::filter_fn(|metadata| {
            metadata.target().contains("api") || metadata.target().contains("server")
        }));

    // Console layer for interactive runs
    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(main_layer)
        .with(error_layer)
        .with(generate_layer)
        .with(bench_layer)
        .with(api_layer)
        .with(console_layer)
        .init();

    tracing::info!("Logging system initialized. Log files in {}", logs_dir.display());

    Ok(guards)
}

/// Console-only logging for short-lived commands
pub fn init_console_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .init();
}

/// `RUST_LOG` if set, otherwise `info`
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Create a daily rolling, non-blocking file appender
fn create_appender(logs_dir: &Path, name: &str) -> (NonBlocking, WorkerGuard) {
    let appender = RollingFileAppender::new(Rotation::DAILY, logs_dir.join(name), name);
    tracing_appender::non_blocking(appender)
}

/// Log macro helpers for specific log types
#[macro_export]
macro_rules! log_generate {
    ($level:expr, $($arg:tt)+) => {
        tracing::event!(target: "generate", $level, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_bench {
    ($level:expr, $($arg:tt)+) => {
        tracing::event!(target: "bench", $level, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_api {
    ($level:expr, $($arg:tt)+) => {
        tracing::event!(target: "api", $level, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appender_writes_into_type_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("bench")).unwrap();
        let (_writer, guard) = create_appender(dir.path(), "bench");
        drop(guard);
        assert!(dir.path().join("bench").is_dir());
    }
}
