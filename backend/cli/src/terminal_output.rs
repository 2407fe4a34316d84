//! Terminal output: colored notes and the run summary table.

use ocrname_core::RunSummary;

// ---------------------------------------------------------------------------
// ANSI Color/Style helpers
// ---------------------------------------------------------------------------

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Check if the terminal supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM").map(|t| t != "dumb").unwrap_or(false))
}

/// Strip ANSI escape codes from a string.
pub fn strip_ansi(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
        } else {
            result.push(c);
        }
    }
    result
}

// ---------------------------------------------------------------------------
// Formatted notes
// ---------------------------------------------------------------------------

pub fn note_info(msg: &str) {
    if supports_color() {
        println!("{CYAN}{BOLD}ℹ{RESET} {msg}");
    } else {
        println!("INFO: {msg}");
    }
}

pub fn note_warn(msg: &str) {
    if supports_color() {
        println!("{YELLOW}{BOLD}⚠{RESET} {msg}");
    } else {
        println!("WARN: {msg}");
    }
}

pub fn note_error(msg: &str) {
    if supports_color() {
        eprintln!("{RED}{BOLD}✗{RESET} {msg}");
    } else {
        eprintln!("ERROR: {msg}");
    }
}

pub fn note_success(msg: &str) {
    if supports_color() {
        println!("{GREEN}{BOLD}✓{RESET} {msg}");
    } else {
        println!("OK: {msg}");
    }
}

// ---------------------------------------------------------------------------
// Table rendering
// ---------------------------------------------------------------------------

/// Two-column table: label left-aligned, value right-aligned.
pub fn render_table(headers: [&str; 2], rows: &[(String, String)]) -> String {
    let label_w = rows
        .iter()
        .map(|(l, _)| strip_ansi(l).chars().count())
        .chain([headers[0].chars().count()])
        .max()
        .unwrap_or(0);
    let value_w = rows
        .iter()
        .map(|(_, v)| strip_ansi(v).chars().count())
        .chain([headers[1].chars().count()])
        .max()
        .unwrap_or(0);

    let mut out = format!("  {:<label_w$}  {:>value_w$}  \n", headers[0], headers[1]);
    out.push_str(&format!("  {}  {}  \n", "-".repeat(label_w), "-".repeat(value_w)));
    for (label, value) in rows {
        out.push_str(&format!("  {label:<label_w$}  {value:>value_w$}  \n"));
    }
    out
}

/// Summary table for a finished run.
pub fn render_summary(summary: &RunSummary, dry_run: bool) -> String {
    let renamed_label = if dry_run { "Would rename" } else { "Renamed" };
    let rows = vec![
        ("Images scanned".to_string(), summary.scanned.to_string()),
        ("Garbled candidates".to_string(), summary.candidates.to_string()),
        (renamed_label.to_string(), summary.renamed.to_string()),
        ("Already named".to_string(), summary.unchanged.to_string()),
        ("Skipped (no text)".to_string(), summary.skipped.to_string()),
        ("Failed".to_string(), summary.failures.len().to_string()),
    ];
    let mut out = render_table(["Result", "Files"], &rows);
    for failure in &summary.failures {
        out.push_str(&format!("  ! {}: {}\n", failure.name, failure.error));
    }
    out
}
