//! Logger initialization
//!
//! Logs go to an append-only file when one is configured, falling back to
//! stdout when the file cannot be opened.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, LogFormat};

/// Directives used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "meowtrics=info,tower_http=info";

/// Open `path` for appending, creating it if needed
pub fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global tracing subscriber.
///
/// Returns the error from opening the log file, if any; logging is still
/// initialized (to stdout) in that case.
pub fn init_logging(config: &AppConfig) -> Option<io::Error> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let (file, open_error) = match config.log_file.as_deref().map(open_log_file) {
        Some(Ok(file)) => (Some(file), None),
        Some(Err(err)) => (None, Some(err)),
        None => (None, None),
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match (config.log_format, file) {
        (LogFormat::Json, Some(file)) => builder
            .json()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init(),
        (LogFormat::Json, None) => builder.json().init(),
        (LogFormat::Pretty, Some(file)) => {
            builder.with_ansi(false).with_writer(Mutex::new(file)).init()
        }
        (LogFormat::Pretty, None) => builder.init(),
    }

    open_error
}
