//! Config file location and loading.

use crate::schema::OcrNameConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Resolve the ocrname config directory.
/// Priority: `OCRNAME_CONFIG_DIR` env > `~/.ocrname/`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("OCRNAME_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    match dirs::home_dir() {
        Some(home) => home.join(".ocrname"),
        None => PathBuf::from(".ocrname"),
    }
}

/// Resolve the full path to the main config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Load and parse the config from disk.
///
/// Returns `Ok(Default::default())` if the file doesn't exist (first run).
pub async fn load_config(path: &Path) -> Result<OcrNameConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(OcrNameConfig::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    // An empty file parses as YAML null.
    if raw.trim().is_empty() {
        return Ok(OcrNameConfig::default());
    }

    let config: OcrNameConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Render a config as YAML for display.
pub fn render_config(config: &OcrNameConfig) -> Result<String> {
    serde_yaml::to_string(config).context("Failed to serialize config to YAML")
}
