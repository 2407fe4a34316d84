//! CLI Doctor Command
//!
//! Checks that a rename pass could run with the current settings.

use std::path::{Path, PathBuf};

use ocrname_config::{ConfigValidationError, Settings};

/// Run all checks; `true` when every one passed.
pub async fn run(settings: &Settings, warnings: &[ConfigValidationError]) -> bool {
    println!("\n🔍 Running ocrname doctor...\n");

    let checks = [
        check_config(warnings),
        check_directory(&settings.directory).await,
        check_tool(&settings.ocr.tool_path),
    ];
    let is_ok = checks.iter().all(|ok| *ok);

    println!();
    if is_ok {
        println!("✅ All checks passed.");
    } else {
        println!("❌ Some checks failed! Please fix the errors above.");
    }
    is_ok
}

fn check_config(warnings: &[ConfigValidationError]) -> bool {
    println!("Configuration:");
    if warnings.is_empty() {
        println!("  🟢 config is valid");
    }
    for w in warnings {
        println!("  🟡 {}: {}", w.path, w.message);
    }
    true
}

async fn check_directory(dir: &Path) -> bool {
    println!("Image directory:");
    match tokio::fs::read_dir(dir).await {
        Ok(_) => {
            println!("  🟢 {} is readable", dir.display());
            true
        }
        Err(e) => {
            println!("  🔴 {} cannot be read: {e}", dir.display());
            false
        }
    }
}

fn check_tool(tool: &str) -> bool {
    println!("OCR tool:");
    match resolve_tool(tool) {
        Some(path) => {
            println!("  🟢 {tool} found at {}", path.display());
            true
        }
        None => {
            println!("  🔴 {tool} not found");
            false
        }
    }
}

/// Locate the tool the way process spawning does: as given when it has a
/// directory component, otherwise through `PATH`.
pub fn resolve_tool(tool: &str) -> Option<PathBuf> {
    let given = Path::new(tool);
    if given.components().count() > 1 {
        return given.is_file().then(|| given.to_path_buf());
    }
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(tool))
        .find(|candidate| candidate.is_file())
}
