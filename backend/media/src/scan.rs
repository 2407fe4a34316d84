//! Directory scanning for image files.
//!
//! Non-recursive. The listing is taken once and sorted by name.

use std::path::Path;

use ocrname_core::{ImageFile, OcrNameError};
use tokio::fs;
use tracing::debug;

/// Whether `name` ends with `.<ext>` for one of `extensions` (lowercase, no dot).
pub fn has_image_extension(name: &str, extensions: &[String]) -> bool {
    let lower = name.to_lowercase();
    extensions.iter().any(|ext| {
        lower
            .strip_suffix(ext.as_str())
            .is_some_and(|rest| rest.ends_with('.'))
    })
}

/// List the regular files in `dir` whose extension is in `extensions`.
pub async fn scan_images(dir: &Path, extensions: &[String]) -> Result<Vec<ImageFile>, OcrNameError> {
    let scan_err = |source: std::io::Error| OcrNameError::ScanFailed {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir).await.map_err(scan_err)?;
    let mut images = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(scan_err)? {
        let Ok(name) = entry.file_name().into_string() else {
            debug!(name = ?entry.file_name(), "Skipping non-UTF-8 file name");
            continue;
        };
        if !has_image_extension(&name, extensions) {
            continue;
        }
        // Follows symlinks, so a link to an image counts as a file.
        match fs::metadata(entry.path()).await {
            Ok(meta) if meta.is_file() => images.push(ImageFile::new(dir, name)),
            Ok(_) => debug!(name = %name, "Skipping non-file entry"),
            Err(e) => debug!(name = %name, error = %e, "Skipping unreadable entry"),
        }
    }

    images.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(images)
}
