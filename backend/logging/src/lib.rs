//! Logging for ocrname.
//!
//! Console and rolling JSON file output, plus the per-file rename event log.

pub mod event_logger;
pub mod logger;

pub use event_logger::{RenameEvent, RenameEventLogger, RenameLogEntry};
pub use logger::{init_logger, LOG_FILE_PREFIX};
