//! `ocrname-config` — configuration for the ocrname image renamer.
//!
//! Provides:
//! - Typed config schema read from YAML
//! - `${ENV_VAR}` substitution in string values
//! - `OCRNAME_*` environment overrides
//! - Default value application
//! - Validation with errors and warnings
//! - Resolved `Settings` for the pipeline

pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod settings;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_config, render_config};
pub use schema::{LoggingConfig, NamingConfig, OcrConfig, OcrNameConfig};
pub use settings::{OcrSettings, Settings};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Overrides the target directory.
pub const ENV_DIR: &str = "OCRNAME_DIR";

/// Overrides the OCR tool path.
pub const ENV_OCR_TOOL: &str = "OCRNAME_OCR_TOOL";

/// A config ready for use, with the validation warnings it produced.
#[derive(Debug)]
pub struct PreparedConfig {
    pub config: OcrNameConfig,
    pub warnings: Vec<ConfigValidationError>,
}

/// Load, substitute env vars, apply overrides and defaults, then validate.
///
/// This is the main entry point for loading a config at runtime. Warnings
/// are returned rather than logged so callers can set up logging from the
/// loaded config first.
pub async fn load_and_prepare(path: &Path) -> Result<PreparedConfig> {
    let raw_config = load_config(path).await?;
    prepare_with(raw_config, &std::env::vars().collect())
}

/// The non-IO half of [`load_and_prepare`], with an explicit environment.
pub fn prepare_with(raw_config: OcrNameConfig, env: &HashMap<String, String>) -> Result<PreparedConfig> {
    let value: Value =
        serde_json::to_value(&raw_config).context("Failed to serialize config for processing")?;
    let value = resolve_env_vars_with(&value, env).context("Failed to resolve env vars in config")?;
    let config: OcrNameConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    let config = apply_env_overrides(config, env);
    let config = apply_all_defaults(config);

    let report = validate(&config);
    if !report.is_valid() {
        let messages: Vec<String> = report.errors.iter().map(ToString::to_string).collect();
        bail!("invalid configuration:\n  {}", messages.join("\n  "));
    }

    Ok(PreparedConfig {
        config,
        warnings: report.warnings,
    })
}

/// Apply `OCRNAME_DIR` and `OCRNAME_OCR_TOOL` on top of the file values.
pub fn apply_env_overrides(mut config: OcrNameConfig, env: &HashMap<String, String>) -> OcrNameConfig {
    if let Some(dir) = env.get(ENV_DIR).filter(|v| !v.is_empty()) {
        config.directory = Some(dir.clone());
    }
    if let Some(tool) = env.get(ENV_OCR_TOOL).filter(|v| !v.is_empty()) {
        config.ocr.get_or_insert_with(OcrConfig::default).tool_path = Some(tool.clone());
    }
    config
}
