//! Decoding of the OCR tool's stdout.
//!
//! The tool may print banners or progress before its reply, so decoding starts
//! at the first `{` and stops after the first complete JSON value.

use anyhow::{anyhow, Result};
use ocrname_core::{OcrLine, OcrResponse};
use serde_json::Value;
use tracing::{debug, warn};

/// Bytes to text, dropping invalid UTF-8 sequences.
pub fn decode_output(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

/// Parse the reply found in `raw`.
///
/// Fails only when no JSON value can be decoded. A reply without
/// `result.lines` is an empty response.
pub fn parse_response(raw: &str) -> Result<OcrResponse> {
    let start = raw.find('{').unwrap_or(0);
    let value = serde_json::Deserializer::from_str(&raw[start..])
        .into_iter::<Value>()
        .next()
        .ok_or_else(|| anyhow!("OCR output contains no JSON"))??;

    if let Some(err) = value.get("error") {
        warn!(error = %err, "OCR tool returned a JSON-RPC error");
    }

    let lines = value
        .get("result")
        .and_then(|r| r.get("lines"))
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(parse_line).collect())
        .unwrap_or_default();

    Ok(OcrResponse { lines })
}

fn parse_line(entry: &Value) -> Option<OcrLine> {
    match serde_json::from_value::<OcrLine>(entry.clone()) {
        Ok(line) => Some(line),
        Err(e) => {
            debug!(error = %e, entry = %entry, "Ignoring malformed OCR line");
            None
        }
    }
}
