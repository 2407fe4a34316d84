//! JSON-RPC 2.0 request sent to the OCR tool on stdin.

use serde::Serialize;

pub const JSONRPC_VERSION: &str = "2.0";
pub const OCR_METHOD: &str = "ocr_text";

#[derive(Debug, Clone, Serialize)]
pub struct OcrParams {
    pub image: String,
    pub format: String,
    pub lang: String,
    pub detect_orientation: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: &'static str,
    pub id: String,
    pub method: &'static str,
    pub params: OcrParams,
}

impl JsonRpcRequest {
    pub fn ocr_text(id: impl Into<String>, params: OcrParams) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id: id.into(),
            method: OCR_METHOD,
            params,
        }
    }

    /// One line of JSON terminated by `\n`.
    pub fn to_line(&self) -> serde_json::Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}
