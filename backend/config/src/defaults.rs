//! Config defaults: fills every unset field with its built-in value.

use std::path::PathBuf;

use crate::schema::{LoggingConfig, NamingConfig, OcrConfig, OcrNameConfig};

/// OCR executable, resolved through PATH when no path is configured.
pub const DEFAULT_OCR_TOOL: &str = "ocrtool-mcp";

/// Language hint passed to the OCR tool.
pub const DEFAULT_OCR_LANG: &str = "zh+en";

/// Output format tag requested from the OCR tool.
pub const DEFAULT_OCR_FORMAT: &str = "structured";

/// Seconds to wait for one OCR call before killing the tool.
pub const DEFAULT_OCR_TIMEOUT_SECS: u64 = 60;

/// Longest filename stem derived from OCR text.
pub const DEFAULT_MAX_NAME_CHARS: usize = 30;

/// Image extensions scanned by default.
pub const DEFAULT_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tiff"];

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// The user's desktop, falling back to `~/Desktop` and then `./Desktop`.
pub fn default_directory() -> PathBuf {
    if let Some(desktop) = dirs::desktop_dir() {
        return desktop;
    }
    match dirs::home_dir() {
        Some(home) => home.join("Desktop"),
        None => PathBuf::from("Desktop"),
    }
}

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: OcrNameConfig) -> OcrNameConfig {
    let config = apply_directory_default(config);
    let config = apply_ocr_defaults(config);
    let config = apply_naming_defaults(config);
    apply_logging_defaults(config)
}

fn apply_directory_default(mut config: OcrNameConfig) -> OcrNameConfig {
    if config.directory.is_none() {
        config.directory = Some(default_directory().to_string_lossy().into_owned());
    }
    config
}

fn apply_ocr_defaults(mut config: OcrNameConfig) -> OcrNameConfig {
    let ocr = config.ocr.get_or_insert_with(OcrConfig::default);
    ocr.tool_path.get_or_insert_with(|| DEFAULT_OCR_TOOL.to_string());
    ocr.lang.get_or_insert_with(|| DEFAULT_OCR_LANG.to_string());
    ocr.format.get_or_insert_with(|| DEFAULT_OCR_FORMAT.to_string());
    ocr.detect_orientation.get_or_insert(true);
    ocr.timeout_secs.get_or_insert(DEFAULT_OCR_TIMEOUT_SECS);
    config
}

fn apply_naming_defaults(mut config: OcrNameConfig) -> OcrNameConfig {
    let naming = config.naming.get_or_insert_with(NamingConfig::default);
    naming.max_chars.get_or_insert(DEFAULT_MAX_NAME_CHARS);
    naming
        .extensions
        .get_or_insert_with(|| DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect());
    config
}

fn apply_logging_defaults(mut config: OcrNameConfig) -> OcrNameConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    logging.level.get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
    config
}
