//! Collision-free target names and the rename itself.

use std::collections::HashSet;
use std::path::Path;

use ocrname_core::OcrNameError;
use tokio::fs;
use tracing::debug;

/// Where a file should go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// The file already carries one of the candidate names.
    Current,
    /// A free name in the same directory.
    Free(String),
}

/// Pick `<stem><ext>`, else `<stem>_1<ext>`, `<stem>_2<ext>`, ...
///
/// A name is taken if it exists in `dir` or is in `reserved` (names handed out
/// earlier in a dry run). Reaching `current` first means no rename is needed.
pub fn resolve_target(
    dir: &Path,
    stem: &str,
    ext: &str,
    current: &str,
    reserved: &HashSet<String>,
) -> Target {
    let mut candidate = format!("{stem}{ext}");
    let mut n = 1u32;
    loop {
        if candidate == current {
            return Target::Current;
        }
        if !reserved.contains(&candidate) && !dir.join(&candidate).exists() {
            return Target::Free(candidate);
        }
        debug!(name = %candidate, "Target name taken");
        candidate = format!("{stem}_{n}{ext}");
        n += 1;
    }
}

/// Rename `from` to `to`. Failure is returned for this file only.
pub async fn rename_image(from: &Path, to: &Path) -> Result<(), OcrNameError> {
    fs::rename(from, to)
        .await
        .map_err(|source| OcrNameError::RenameFailed {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        })
}
