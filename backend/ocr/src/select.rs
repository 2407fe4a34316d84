//! Title selection: the tallest line is taken as the image's heading.

use ocrname_core::OcrLine;

/// The line with the greatest bounding-box height. Ties keep the first.
pub fn tallest_line(lines: &[OcrLine]) -> Option<&OcrLine> {
    lines.iter().fold(None, |best: Option<&OcrLine>, line| match best {
        Some(b) if b.bbox.height >= line.bbox.height => Some(b),
        _ => Some(line),
    })
}

/// Text of the tallest line, or `None` when there is nothing usable.
pub fn select_title(lines: &[OcrLine]) -> Option<&str> {
    tallest_line(lines)
        .map(|line| line.text.as_str())
        .filter(|text| !text.trim().is_empty())
}
