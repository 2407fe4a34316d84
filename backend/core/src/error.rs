use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the ocrname pipeline.
#[derive(Debug, Error)]
pub enum OcrNameError {
    #[error("cannot read directory {path}: {source}")]
    ScanFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start OCR tool {tool}: {source}")]
    OcrSpawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("OCR tool I/O failed: {0}")]
    OcrIo(#[source] std::io::Error),

    #[error("OCR tool timed out after {0}s")]
    OcrTimeout(u64),

    #[error("rename {from} -> {to} failed: {source}")]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_error_mentions_both_paths() {
        let err = OcrNameError::RenameFailed {
            from: PathBuf::from("/d/a.png"),
            to: PathBuf::from("/d/b.png"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        let msg = err.to_string();
        assert!(msg.contains("/d/a.png"));
        assert!(msg.contains("/d/b.png"));
    }

    #[test]
    fn timeout_reports_seconds() {
        assert_eq!(OcrNameError::OcrTimeout(5).to_string(), "OCR tool timed out after 5s");
    }
}
