//! Rename pass over one directory.
//!
//! Scan → classify → for each candidate: OCR → select → sanitize → rename.
//! Files are handled one at a time; a failing file is recorded and the run
//! moves on.

use std::collections::HashSet;

use anyhow::Result;
use tracing::{info, warn};

use ocrname_config::Settings;
use ocrname_core::{FileOutcome, ImageFile, OcrNameError, RunSummary, SkipReason};
use ocrname_logging::{RenameEvent, RenameEventLogger};
use ocrname_media::{is_garbled, rename_image, resolve_target, sanitize_stem, scan_images, Target};
use ocrname_ocr::{select_title, OcrClient, OcrOptions};

use crate::terminal_output::{note_error, note_info, note_success, note_warn};

/// Per-run state shared by the files of one pass.
pub struct RenameRun {
    client: OcrClient,
    max_name_chars: usize,
    dry_run: bool,
    /// Names handed out during a dry run, which never touches the disk.
    reserved: HashSet<String>,
}

impl RenameRun {
    pub fn new(settings: &Settings, dry_run: bool) -> Self {
        let client = OcrClient::new(OcrOptions {
            tool_path: settings.ocr.tool_path.clone().into(),
            lang: settings.ocr.lang.clone(),
            format: settings.ocr.format.clone(),
            detect_orientation: settings.ocr.detect_orientation,
            timeout: settings.ocr.timeout,
        });
        Self {
            client,
            max_name_chars: settings.max_name_chars,
            dry_run,
            reserved: HashSet::new(),
        }
    }

    /// OCR one image and rename it after its tallest text line.
    ///
    /// Returns the outcome and the OCR text the name was derived from.
    pub async fn process_file(
        &mut self,
        image: &ImageFile,
    ) -> Result<(FileOutcome, Option<String>), OcrNameError> {
        let response = self.client.recognize(&image.path).await;
        let Some(title) = select_title(&response.lines) else {
            return Ok((skipped(image, SkipReason::NoText), None));
        };
        let title = title.to_string();
        info!(file = %image.name, text = %title, "Selected tallest line");

        let stem = sanitize_stem(&title, self.max_name_chars);
        if stem.is_empty() {
            return Ok((skipped(image, SkipReason::EmptyName), Some(title)));
        }

        let new_name = match resolve_target(image.dir(), &stem, image.extension(), &image.name, &self.reserved) {
            Target::Current => {
                return Ok((FileOutcome::Unchanged { name: image.name.clone() }, Some(title)));
            }
            Target::Free(name) => name,
        };

        let outcome = if self.dry_run {
            self.reserved.insert(new_name.clone());
            FileOutcome::WouldRename {
                from: image.name.clone(),
                to: new_name,
            }
        } else {
            rename_image(&image.path, &image.dir().join(&new_name)).await?;
            FileOutcome::Renamed {
                from: image.name.clone(),
                to: new_name,
            }
        };
        Ok((outcome, Some(title)))
    }
}

fn skipped(image: &ImageFile, reason: SkipReason) -> FileOutcome {
    FileOutcome::Skipped {
        name: image.name.clone(),
        reason,
    }
}

/// Run the whole pass. Only a failure to list the directory is fatal.
pub async fn run(settings: &Settings, dry_run: bool) -> Result<RunSummary> {
    info!(dir = %settings.directory.display(), dry_run, "Scanning for images");

    let images = scan_images(&settings.directory, &settings.extensions).await?;
    let candidates: Vec<&ImageFile> = images.iter().filter(|img| is_garbled(&img.name)).collect();

    let mut summary = RunSummary {
        scanned: images.len(),
        candidates: candidates.len(),
        ..Default::default()
    };

    if candidates.is_empty() {
        note_info(&format!(
            "No garbled image names in {} ({} images scanned)",
            settings.directory.display(),
            images.len()
        ));
        return Ok(summary);
    }

    let names: Vec<&str> = candidates.iter().map(|img| img.name.as_str()).collect();
    note_info(&format!("Garbled image names: {}", names.join(", ")));

    let mut pass = RenameRun::new(settings, dry_run);
    for image in candidates {
        match pass.process_file(image).await {
            Ok((outcome, text)) => {
                match &outcome {
                    FileOutcome::Renamed { .. } | FileOutcome::WouldRename { .. } => {
                        note_success(&outcome.to_string())
                    }
                    FileOutcome::Unchanged { .. } => note_info(&outcome.to_string()),
                    FileOutcome::Skipped { .. } => note_warn(&outcome.to_string()),
                }
                summary.record(&outcome);
                RenameEventLogger::log(RenameEvent::from_outcome(&outcome, text.as_deref()));
            }
            Err(e) => {
                warn!(file = %image.name, error = %e, "Failed to rename image");
                note_error(&format!("{}: {e}", image.name));
                RenameEventLogger::log(RenameEvent::Failed {
                    name: image.name.clone(),
                    error: e.to_string(),
                });
                summary.record_failure(image.name.clone(), e);
            }
        }
    }

    Ok(summary)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    use ocrname_config::OcrSettings;

    /// Fake OCR tool that answers every request with `reply`.
    fn fake_tool(dir: &Path, reply: &str) -> PathBuf {
        fake_tool_with(dir, "", reply)
    }

    /// Like `fake_tool`, running `before` ahead of the reply.
    fn fake_tool_with(dir: &Path, before: &str, reply: &str) -> PathBuf {
        let path = dir.join("fake-ocr");
        let body = format!("#!/bin/sh\ncat > /dev/null\n{before}\ncat <<'JSON'\n{reply}\nJSON\n");
        std::fs::write(&path, body).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn settings(images: &Path, tool: &Path) -> Settings {
        Settings {
            directory: images.to_path_buf(),
            ocr: OcrSettings {
                tool_path: tool.to_string_lossy().into_owned(),
                lang: "zh+en".into(),
                format: "structured".into(),
                detect_orientation: true,
                timeout: Duration::from_secs(10),
            },
            max_name_chars: 30,
            extensions: ["png", "jpg", "jpeg", "bmp", "gif", "tiff"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
            log_level: "info".into(),
            log_dir: None,
        }
    }

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"img").unwrap();
    }

    const INVOICE: &str =
        r#"{"jsonrpc":"2.0","id":"1","result":{"lines":[{"text":"Invoice March","bbox":{"height":40}}]}}"#;

    #[tokio::test]
    async fn renames_garbled_image_from_ocr_title() {
        let tools = tempfile::tempdir().unwrap();
        let images = tempfile::tempdir().unwrap();
        touch(images.path(), "IMG_20240101_abcdefgh.png");
        touch(images.path(), "holiday.png");

        let tool = fake_tool(tools.path(), INVOICE);
        let summary = run(&settings(images.path(), &tool), false).await.unwrap();

        assert!(images.path().join("Invoice_March.png").exists());
        assert!(!images.path().join("IMG_20240101_abcdefgh.png").exists());
        assert!(images.path().join("holiday.png").exists());
        assert_eq!(summary.scanned, 2);
        assert_eq!(summary.candidates, 1);
        assert_eq!(summary.renamed, 1);
        assert!(!summary.has_failures());
    }

    #[tokio::test]
    async fn unparseable_output_leaves_file_alone() {
        let tools = tempfile::tempdir().unwrap();
        let images = tempfile::tempdir().unwrap();
        touch(images.path(), "IMG_20240101_abcdefgh.png");

        let tool = fake_tool(tools.path(), "model not found");
        let summary = run(&settings(images.path(), &tool), false).await.unwrap();

        assert!(images.path().join("IMG_20240101_abcdefgh.png").exists());
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.renamed, 0);
    }

    #[tokio::test]
    async fn same_title_gets_counter_suffixes() {
        let tools = tempfile::tempdir().unwrap();
        let images = tempfile::tempdir().unwrap();
        touch(images.path(), "Invoice_March.png");
        touch(images.path(), "a1b2c3d4e5f6.png");
        touch(images.path(), "f6e5d4c3b2a1.png");

        let tool = fake_tool(tools.path(), INVOICE);
        let summary = run(&settings(images.path(), &tool), false).await.unwrap();

        assert_eq!(summary.renamed, 2);
        assert!(images.path().join("Invoice_March_1.png").exists());
        assert!(images.path().join("Invoice_March_2.png").exists());
    }

    #[tokio::test]
    async fn dry_run_reserves_names_without_renaming() {
        let tools = tempfile::tempdir().unwrap();
        let images = tempfile::tempdir().unwrap();
        touch(images.path(), "a1b2c3d4e5f6.png");
        touch(images.path(), "f6e5d4c3b2a1.png");

        let tool = fake_tool(tools.path(), INVOICE);
        let mut pass = RenameRun::new(&settings(images.path(), &tool), true);

        let first = ImageFile::new(images.path(), "a1b2c3d4e5f6.png");
        let second = ImageFile::new(images.path(), "f6e5d4c3b2a1.png");
        let (out1, text) = pass.process_file(&first).await.unwrap();
        let (out2, _) = pass.process_file(&second).await.unwrap();

        assert_eq!(text.as_deref(), Some("Invoice March"));
        assert_eq!(
            out1,
            FileOutcome::WouldRename {
                from: "a1b2c3d4e5f6.png".into(),
                to: "Invoice_March.png".into()
            }
        );
        assert_eq!(
            out2,
            FileOutcome::WouldRename {
                from: "f6e5d4c3b2a1.png".into(),
                to: "Invoice_March_1.png".into()
            }
        );
        assert!(first.path.exists());
        assert!(!images.path().join("Invoice_March.png").exists());
    }

    #[tokio::test]
    async fn symbols_only_title_is_skipped() {
        let tools = tempfile::tempdir().unwrap();
        let images = tempfile::tempdir().unwrap();
        touch(images.path(), "0123456789abcdef.jpg");

        let tool = fake_tool(
            tools.path(),
            r#"{"result":{"lines":[{"text":"$$$ ???","bbox":{"height":40}}]}}"#,
        );
        let mut pass = RenameRun::new(&settings(images.path(), &tool), false);
        let image = ImageFile::new(images.path(), "0123456789abcdef.jpg");
        let (outcome, _) = pass.process_file(&image).await.unwrap();

        assert_eq!(
            outcome,
            FileOutcome::Skipped {
                name: "0123456789abcdef.jpg".into(),
                reason: SkipReason::EmptyName
            }
        );
    }

    #[tokio::test]
    async fn rename_failure_does_not_stop_the_batch() {
        let tools = tempfile::tempdir().unwrap();
        let images = tempfile::tempdir().unwrap();
        touch(images.path(), "a1b2c3d4e5f6.png");
        touch(images.path(), "f6e5d4c3b2a1.png");

        let tool = fake_tool(tools.path(), INVOICE);
        let mut pass = RenameRun::new(&settings(images.path(), &tool), false);

        // Source vanished between scan and rename.
        let vanished = ImageFile::new(images.path(), "0000000000gone.png");
        let err = pass.process_file(&vanished).await.unwrap_err();
        assert!(matches!(err, OcrNameError::RenameFailed { .. }));

        let present = ImageFile::new(images.path(), "a1b2c3d4e5f6.png");
        let (outcome, _) = pass.process_file(&present).await.unwrap();
        assert!(matches!(outcome, FileOutcome::Renamed { .. }));
    }

    #[tokio::test]
    async fn failed_rename_is_summarized_and_the_pass_continues() {
        let tools = tempfile::tempdir().unwrap();
        let images = tempfile::tempdir().unwrap();
        touch(images.path(), "a1b2c3d4e5f6.png");
        touch(images.path(), "f6e5d4c3b2a1.png");

        // The first candidate disappears while its OCR call is running.
        let vanish = format!("rm -f '{}'", images.path().join("a1b2c3d4e5f6.png").display());
        let tool = fake_tool_with(tools.path(), &vanish, INVOICE);
        let summary = run(&settings(images.path(), &tool), false).await.unwrap();

        assert_eq!(summary.candidates, 2);
        assert_eq!(summary.renamed, 1);
        assert!(summary.has_failures());
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].name, "a1b2c3d4e5f6.png");
        assert!(summary.failures[0].error.contains("Invoice_March.png"));
        assert!(images.path().join("Invoice_March.png").exists());
        assert!(!images.path().join("f6e5d4c3b2a1.png").exists());
        assert_eq!(crate::exit_code(&summary), std::process::ExitCode::FAILURE);
    }

    #[tokio::test]
    async fn unreadable_directory_is_fatal() {
        let tools = tempfile::tempdir().unwrap();
        let tool = fake_tool(tools.path(), INVOICE);
        let missing = tools.path().join("no-such-dir");
        assert!(run(&settings(&missing, &tool), false).await.is_err());
    }
}
