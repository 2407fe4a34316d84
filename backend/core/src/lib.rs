//! `ocrname-core` — data model and error taxonomy shared by the ocrname crates.

pub mod error;
pub mod outcome;
pub mod types;

pub use error::OcrNameError;
pub use outcome::{FileFailure, FileOutcome, RunSummary, SkipReason};
pub use types::{split_extension, BoundingBox, ImageFile, OcrLine, OcrResponse};
