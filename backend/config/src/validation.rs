//! Config validation: field checks with user-friendly messages.

use crate::schema::OcrNameConfig;
use std::path::Path;
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// Errors and warnings found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &OcrNameConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_directory(config, &mut report);
    validate_ocr(config, &mut report);
    validate_naming(config, &mut report);
    report
}

fn validate_directory(config: &OcrNameConfig, report: &mut ValidationReport) {
    if let Some(dir) = &config.directory {
        if dir.trim().is_empty() {
            report.error("directory", "directory cannot be empty");
        }
    }
}

fn validate_ocr(config: &OcrNameConfig, report: &mut ValidationReport) {
    let Some(ocr) = &config.ocr else { return };

    if ocr.timeout_secs == Some(0) {
        report.error("ocr.timeoutSecs", "timeoutSecs must be > 0");
    }
    if let Some(lang) = &ocr.lang {
        if lang.trim().is_empty() {
            report.warn("ocr.lang", "Empty language hint; the OCR tool picks its own default");
        }
    }
    if let Some(tool) = &ocr.tool_path {
        if tool.trim().is_empty() {
            report.error("ocr.toolPath", "toolPath cannot be empty");
        } else if is_explicit_path(tool) && !Path::new(tool).exists() {
            report.warn("ocr.toolPath", format!("OCR tool '{tool}' does not exist"));
        }
    }
}

fn validate_naming(config: &OcrNameConfig, report: &mut ValidationReport) {
    let Some(naming) = &config.naming else { return };

    if naming.max_chars == Some(0) {
        report.error("naming.maxChars", "maxChars must be >= 1");
    }
    if let Some(exts) = &naming.extensions {
        if exts.is_empty() {
            report.error("naming.extensions", "At least one image extension is required");
        }
        for (i, ext) in exts.iter().enumerate() {
            if ext.is_empty() || ext.contains(&['.', '/', '\\'][..]) {
                report.error(
                    format!("naming.extensions[{i}]"),
                    format!("Invalid extension '{ext}'; use a bare name such as 'png'"),
                );
            }
        }
    }
}

/// A tool given with a directory component, as opposed to a PATH lookup.
fn is_explicit_path(tool: &str) -> bool {
    tool.contains(std::path::MAIN_SEPARATOR) || tool.contains('/')
}
