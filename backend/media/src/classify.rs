//! Garbled-name detection.
//!
//! Two independent heuristics decide whether a file name looks machine
//! generated; either one is enough to queue the image for OCR.

use once_cell::sync::Lazy;
use regex::Regex;

use ocrname_core::split_extension;

/// Stems made only of ASCII alphanumerics, `-`, `_` and `.`.
static HASH_CHARSET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9\-_.]+$").unwrap());

/// Any character outside ASCII alphanumerics and CJK ideographs.
static NON_READABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9\x{4e00}-\x{9fa5}]").unwrap());

/// Any ASCII letter or CJK ideograph.
static LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z\x{4e00}-\x{9fa5}]").unwrap());

/// Stems at or below this length are never treated as hashes.
pub const HASH_MIN_LEN: usize = 8;

/// Camera or hash style stem, e.g. `IMG_20240101_abcdefgh` or `3f2a9c1e0b7d`.
pub fn is_hash_like(stem: &str) -> bool {
    HASH_CHARSET.is_match(stem) && stem.chars().count() > HASH_MIN_LEN
}

/// Stem with symbols but no letters at all, e.g. `2024-01-01 (3)` or `###`.
///
/// Digits alone do not trigger this: `12345` has nothing outside the
/// readable set.
pub fn is_symbol_only(stem: &str) -> bool {
    NON_READABLE.is_match(stem) && !LETTER.is_match(stem)
}

/// Whether `file_name` (no directory) should be renamed from its OCR text.
pub fn is_garbled(file_name: &str) -> bool {
    let (stem, _) = split_extension(file_name);
    is_hash_like(stem) || is_symbol_only(stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_and_hash_names_are_garbled() {
        assert!(is_garbled("IMG_20240101_abcdefgh.png"));
        assert!(is_garbled("3f2a9c1e0b7d44aa.jpg"));
        assert!(is_garbled("Screen-Shot.2024.png"));
    }

    #[test]
    fn short_hash_names_are_kept() {
        assert!(!is_hash_like("IMG_0001"));
        assert!(!is_garbled("abcdefgh.png"));
        assert!(is_garbled("abcdefghi.png"));
    }

    #[test]
    fn readable_names_are_kept() {
        assert!(!is_garbled("发票 三月.png"));
        assert!(!is_garbled("holiday photo.jpg"));
        assert!(!is_garbled("12345.png"));
    }

    #[test]
    fn symbol_only_names_are_garbled() {
        assert!(is_symbol_only("2024-01-01 (3)"));
        assert!(is_symbol_only("###"));
        assert!(!is_symbol_only("a#b"));
        assert!(!is_symbol_only("12345"));
        assert!(is_garbled("~~ 01 ~~.gif"));
    }

    #[test]
    fn extension_is_not_part_of_the_stem() {
        // 9 characters only when the extension is counted.
        assert!(!is_garbled("abcd.tiff"));
    }
}
