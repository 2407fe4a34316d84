//! Resolved settings handed to the pipeline.

use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

use crate::defaults::apply_all_defaults;
use crate::schema::OcrNameConfig;

#[derive(Debug, Clone, Serialize)]
pub struct OcrSettings {
    pub tool_path: String,
    pub lang: String,
    pub format: String,
    pub detect_orientation: bool,
    pub timeout: Duration,
}

/// Concrete values for one run; every field is set.
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    pub directory: PathBuf,
    pub ocr: OcrSettings,
    pub max_name_chars: usize,
    /// Lowercased, without the dot.
    pub extensions: Vec<String>,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Settings {
    /// Resolve `config`; unset fields take the values from `apply_all_defaults`.
    pub fn from_config(config: &OcrNameConfig) -> Self {
        let config = apply_all_defaults(config.clone());
        let ocr = config.ocr.unwrap_or_default();
        let naming = config.naming.unwrap_or_default();
        let logging = config.logging.unwrap_or_default();

        Self {
            directory: config.directory.map(PathBuf::from).unwrap_or_default(),
            ocr: OcrSettings {
                tool_path: ocr.tool_path.unwrap_or_default(),
                lang: ocr.lang.unwrap_or_default(),
                format: ocr.format.unwrap_or_default(),
                detect_orientation: ocr.detect_orientation.unwrap_or_default(),
                timeout: Duration::from_secs(ocr.timeout_secs.unwrap_or_default()),
            },
            max_name_chars: naming.max_chars.unwrap_or_default(),
            extensions: naming
                .extensions
                .unwrap_or_default()
                .into_iter()
                .map(|e| e.to_lowercase())
                .collect(),
            log_level: logging.level.unwrap_or_default(),
            log_dir: logging.dir.map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{NamingConfig, OcrConfig};

    #[test]
    fn resolves_defaults_without_prepared_config() {
        let settings = Settings::from_config(&OcrNameConfig::default());
        assert_eq!(settings.ocr.tool_path, crate::defaults::DEFAULT_OCR_TOOL);
        assert!(settings.ocr.detect_orientation);
        assert_eq!(settings.ocr.lang, "zh+en");
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.directory, crate::defaults::default_directory());
        assert_eq!(settings.ocr.timeout, Duration::from_secs(60));
        assert_eq!(settings.max_name_chars, 30);
        assert!(settings.extensions.contains(&"tiff".to_string()));
        assert!(settings.log_dir.is_none());
    }

    #[test]
    fn lowercases_extensions() {
        let cfg = OcrNameConfig {
            directory: Some("/tmp/pics".into()),
            ocr: Some(OcrConfig {
                timeout_secs: Some(5),
                ..Default::default()
            }),
            naming: Some(NamingConfig {
                extensions: Some(vec!["PNG".into(), "Heic".into()]),
                ..Default::default()
            }),
            ..Default::default()
        };
        let settings = Settings::from_config(&cfg);
        assert_eq!(settings.directory, PathBuf::from("/tmp/pics"));
        assert_eq!(settings.extensions, vec!["png", "heic"]);
        assert_eq!(settings.ocr.timeout, Duration::from_secs(5));
    }
}
