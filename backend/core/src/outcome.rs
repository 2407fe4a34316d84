use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a candidate was left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// OCR produced no lines, or the tallest line had no text.
    NoText,
    /// The selected text had no characters left after sanitizing.
    EmptyName,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoText => write!(f, "no text recognized"),
            SkipReason::EmptyName => write!(f, "recognized text has no usable characters"),
        }
    }
}

/// Result of processing one candidate image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Renamed { from: String, to: String },
    WouldRename { from: String, to: String },
    /// The resolved name is the current name.
    Unchanged { name: String },
    Skipped { name: String, reason: SkipReason },
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOutcome::Renamed { from, to } => write!(f, "{from} -> {to}"),
            FileOutcome::WouldRename { from, to } => write!(f, "{from} -> {to} (dry run)"),
            FileOutcome::Unchanged { name } => write!(f, "{name} already has this name"),
            FileOutcome::Skipped { name, reason } => write!(f, "{name} skipped: {reason}"),
        }
    }
}

/// A per-file error that did not stop the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    pub name: String,
    pub error: String,
}

/// Aggregated result of one pass over the directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub scanned: usize,
    pub candidates: usize,
    pub renamed: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub failures: Vec<FileFailure>,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Renamed { .. } | FileOutcome::WouldRename { .. } => self.renamed += 1,
            FileOutcome::Unchanged { .. } => self.unchanged += 1,
            FileOutcome::Skipped { .. } => self.skipped += 1,
        }
    }

    pub fn record_failure(&mut self, name: impl Into<String>, error: impl fmt::Display) {
        self.failures.push(FileFailure {
            name: name.into(),
            error: error.to_string(),
        });
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_outcomes() {
        let mut summary = RunSummary::default();
        summary.record(&FileOutcome::Renamed {
            from: "a.png".into(),
            to: "b.png".into(),
        });
        summary.record(&FileOutcome::Skipped {
            name: "c.png".into(),
            reason: SkipReason::NoText,
        });
        summary.record_failure("d.png", "permission denied");

        assert_eq!(summary.renamed, 1);
        assert_eq!(summary.skipped, 1);
        assert!(summary.has_failures());
        assert_eq!(summary.failures[0].name, "d.png");
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let outcome = FileOutcome::Skipped {
            name: "x.png".into(),
            reason: SkipReason::NoText,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "skipped");
        assert_eq!(json["reason"], "no_text");
    }
}
