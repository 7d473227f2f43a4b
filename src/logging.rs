//! Structured JSONL logging to a file plus human-readable stderr output.
//!
//! - **JSONL to file** (~/.shortcut-engine/logs/shortcut-engine.jsonl)
//! - **Compact to stderr** for developers
//!
//! Stdout is left alone: the CLI writes match outcomes there.
//!
//! # Usage
//!
//! ```rust,ignore
//! use shortcut_engine::logging;
//!
//! // MUST keep guard alive for duration of program
//! let _guard = logging::init();
//!
//! tracing::info!(event_type = "shortcut_triggered", action_id = "save", "Shortcut matched");
//! ```

use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;

use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const LOG_FILE_NAME: &str = "shortcut-engine.jsonl";
const DEFAULT_FILTER: &str = "info";

/// Guard that must be kept alive for the duration of the program.
/// Dropping this guard will flush and close the log file.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize file + stderr logging.
///
/// If the log file cannot be opened, only the stderr layer is installed.
pub fn init() -> LoggingGuard {
    let log_dir = get_log_dir();
    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("[LOGGING] Failed to create log directory: {}", e);
    }

    let log_path = log_dir.join(LOG_FILE_NAME);

    let file = match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("[LOGGING] Failed to open log file: {}", e);
            None
        }
    };

    let (subscriber, file_guard) = build_subscriber(file);
    subscriber.init();

    tracing::info!(
        event_type = "app_lifecycle",
        action = "started",
        log_path = %log_path.display(),
        "Logging initialized"
    );

    LoggingGuard {
        _file_guard: file_guard,
    }
}

/// Compose the filter, the optional JSONL file layer and the stderr layer.
fn build_subscriber(
    file: Option<File>,
) -> (impl Subscriber + Send + Sync + 'static, Option<WorkerGuard>) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // Non-blocking so key handling never waits on disk
    let (json_layer, file_guard) = match file {
        Some(file) => {
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .json()
                .with_writer(non_blocking_file)
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_file(false)
                .with_line_number(false)
                .with_span_events(FmtSpan::NONE);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(stderr_layer);

    (subscriber, file_guard)
}

/// Get the log directory path (~/.shortcut-engine/logs/)
fn get_log_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".shortcut-engine").join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("shortcut-engine-logs"))
}

/// Get the path to the JSONL log file
pub fn log_path() -> PathBuf {
    get_log_dir().join(LOG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_layer_writes_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        let file = File::create(&path).unwrap();

        let (subscriber, guard) = build_subscriber(Some(file));
        assert!(guard.is_some());
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(event_type = "shortcut_triggered", action_id = "save", "Shortcut matched");
        });
        drop(guard);

        let contents = fs::read_to_string(&path).unwrap();
        let line = contents.lines().next().unwrap();
        let entry: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(entry["fields"]["action_id"], "save");
        assert_eq!(entry["level"], "INFO");
    }

    #[test]
    fn test_stderr_only_when_file_unavailable() {
        let (subscriber, guard) = build_subscriber(None);
        assert!(guard.is_none());
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("stderr only");
        });
    }

    #[test]
    fn test_log_path_file_name() {
        assert_eq!(
            log_path().file_name().and_then(|n| n.to_str()),
            Some(LOG_FILE_NAME)
        );
    }
}
