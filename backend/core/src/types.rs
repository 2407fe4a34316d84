use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

/// An image in the scanned directory whose extension is on the allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub path: PathBuf,
    pub name: String,
}

impl ImageFile {
    pub fn new(dir: &Path, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: dir.join(&name),
            name,
        }
    }

    /// Directory holding the file; renames stay inside it.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Extension including the leading dot, original case kept. Empty if none.
    pub fn extension(&self) -> &str {
        split_extension(&self.name).1
    }
}

/// Split `name` into stem and extension (with dot).
///
/// A leading dot does not start an extension, so `.png` has stem `.png`.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 && name[..idx].chars().any(|c| c != '.') => name.split_at(idx),
        _ => (name, ""),
    }
}

/// Treats an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Rectangle reported by the OCR tool for one text line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundingBox {
    #[serde(deserialize_with = "null_as_default")]
    pub x: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub y: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub width: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub height: f64,
}

/// One recognized text line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrLine {
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bbox: BoundingBox,
    /// Orientation metadata as reported by the tool, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<serde_json::Value>,
}

impl OcrLine {
    pub fn new(text: impl Into<String>, height: f64) -> Self {
        Self {
            text: text.into(),
            bbox: BoundingBox {
                height,
                ..Default::default()
            },
            orientation: None,
        }
    }
}

/// Decoded OCR reply. Empty whenever the tool output could not be decoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OcrResponse {
    pub lines: Vec<OcrLine>,
}

impl OcrResponse {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_stem_and_extension() {
        let img = ImageFile::new(Path::new("/desk"), "IMG_0001.PNG");
        assert_eq!(img.extension(), ".PNG");
        assert_eq!(img.dir(), Path::new("/desk"));
    }

    #[test]
    fn dotfile_has_no_extension() {
        assert_eq!(split_extension(".png"), (".png", ""));
        assert_eq!(split_extension("a.b.jpg"), ("a.b", ".jpg"));
        assert_eq!(split_extension("noext"), ("noext", ""));
    }

    #[test]
    fn line_defaults_missing_fields() {
        let line: OcrLine = serde_json::from_str(r#"{"text": "hi"}"#).unwrap();
        assert_eq!(line.bbox.height, 0.0);

        let line: OcrLine = serde_json::from_str(r#"{"bbox": {"height": 12.5, "x": 3}}"#).unwrap();
        assert_eq!(line.text, "");
        assert_eq!(line.bbox.height, 12.5);
        assert_eq!(line.bbox.x, 3.0);
    }

    #[test]
    fn null_fields_count_as_missing() {
        let line: OcrLine =
            serde_json::from_str(r#"{"text": "Title", "bbox": {"height": null, "width": 7}}"#).unwrap();
        assert_eq!(line.text, "Title");
        assert_eq!(line.bbox.height, 0.0);
        assert_eq!(line.bbox.width, 7.0);

        let line: OcrLine = serde_json::from_str(r#"{"text": null, "bbox": null}"#).unwrap();
        assert_eq!(line.text, "");
        assert_eq!(line.bbox, BoundingBox::default());
    }
}
