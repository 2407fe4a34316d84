//! Structured Logger
//!
//! Console output on stderr plus an optional daily-rolling NDJSON file.

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name prefix of the rolling log, e.g. `ocrname.log.2024-01-01`.
pub const LOG_FILE_PREFIX: &str = "ocrname.log";

/// Initialize the global logger. `RUST_LOG` takes precedence over `level`.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_logger(level: &str, log_dir: Option<&Path>) -> bool {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(true);

    let file_layer = log_dir.map(|dir| {
        let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
        fmt::layer().json().with_writer(appender).with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .is_ok()
}
