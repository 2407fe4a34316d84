//! OCR client
//!
//! One JSON-RPC call per image to an external tool speaking JSON over stdio.
//! Failures never leave this module: they are logged and reported as an
//! empty response, which callers treat as "no text found".

use std::path::{Path, PathBuf};
use std::time::Duration;

use ocrname_core::{OcrNameError, OcrResponse};
use tracing::{debug, info, warn};

use crate::exec::exec_with_stdin;
use crate::request::{JsonRpcRequest, OcrParams};
use crate::response::{decode_output, parse_response};

/// Settings for calls to the OCR tool.
#[derive(Debug, Clone)]
pub struct OcrOptions {
    pub tool_path: PathBuf,
    pub lang: String,
    pub format: String,
    pub detect_orientation: bool,
    pub timeout: Duration,
}

pub struct OcrClient {
    options: OcrOptions,
}

impl OcrClient {
    pub fn new(options: OcrOptions) -> Self {
        Self { options }
    }

    /// Recognize the text lines of `image`. Empty on any failure.
    pub async fn recognize(&self, image: &Path) -> OcrResponse {
        info!(image = %image.display(), "Running OCR");
        match self.try_recognize(image).await {
            Ok(response) => {
                debug!(image = %image.display(), lines = response.lines.len(), "OCR finished");
                response
            }
            Err(e) => {
                warn!(image = %image.display(), error = %e, "OCR failed; treating as no text");
                OcrResponse::empty()
            }
        }
    }

    async fn try_recognize(&self, image: &Path) -> Result<OcrResponse, OcrNameError> {
        let request = self.build_request(image)?;
        let line = request
            .to_line()
            .map_err(|e| OcrNameError::Other(e.into()))?;

        let result = exec_with_stdin(&self.options.tool_path, line.as_bytes(), self.options.timeout).await?;
        if result.exit_code != 0 {
            debug!(exit_code = result.exit_code, "OCR tool exited with non-zero status");
        }
        if !result.stderr.is_empty() {
            debug!(stderr = %decode_output(&result.stderr), "OCR tool stderr");
        }

        let stdout = decode_output(&result.stdout);
        parse_response(&stdout).map_err(OcrNameError::Other)
    }

    pub fn build_request(&self, image: &Path) -> Result<JsonRpcRequest, OcrNameError> {
        let image = absolute_path(image).map_err(OcrNameError::OcrIo)?;
        Ok(JsonRpcRequest::ocr_text(
            "1",
            OcrParams {
                image: image.to_string_lossy().into_owned(),
                format: self.options.format.clone(),
                lang: self.options.lang.clone(),
                detect_orientation: self.options.detect_orientation,
            },
        ))
    }
}

fn absolute_path(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
