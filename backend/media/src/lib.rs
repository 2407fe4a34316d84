//! Image-file handling for ocrname: discovery, garbled-name detection,
//! filename sanitizing and collision-free renames.

pub mod classify;
pub mod rename;
pub mod sanitize;
pub mod scan;

pub use classify::{is_garbled, is_hash_like, is_symbol_only};
pub use rename::{rename_image, resolve_target, Target};
pub use sanitize::sanitize_stem;
pub use scan::{has_image_extension, scan_images};
