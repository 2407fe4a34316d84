//! Filename derivation from OCR text.

use once_cell::sync::Lazy;
use regex::Regex;

/// Everything except CJK ideographs, ASCII alphanumerics, `_` and space.
static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\x{4e00}-\x{9fa5}A-Za-z0-9_ ]").unwrap());

/// Filename stem for `text`: disallowed characters removed, trimmed, spaces
/// turned into `_`, cut to `max_chars` characters. May be empty.
pub fn sanitize_stem(text: &str, max_chars: usize) -> String {
    let kept = DISALLOWED.replace_all(text, "");
    kept.trim().replace(' ', "_").chars().take(max_chars).collect()
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn allowed(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_' || ('\u{4e00}'..='\u{9fa5}').contains(&c)
    }

    proptest! {
        #[test]
        fn stem_is_bounded_and_clean(text in any::<String>(), max in 1usize..64) {
            let stem = sanitize_stem(&text, max);
            prop_assert!(stem.chars().count() <= max);
            prop_assert!(stem.chars().all(allowed), "{:?} -> {:?}", text, stem);
        }

        #[test]
        fn stem_is_deterministic_and_never_leads_with_underscore(text in "[ a-zA-Z发票!?]{0,50}") {
            let stem = sanitize_stem(&text, 30);
            prop_assert!(!stem.starts_with('_'), "{:?} -> {:?}", text, stem);
            prop_assert_eq!(sanitize_stem(&text, 30), stem);
        }
    }
}
