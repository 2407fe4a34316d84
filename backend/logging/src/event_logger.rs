//! Rename Event Logger
//!
//! One structured entry per processed image on the `rename_events` target,
//! so the JSON log file keeps a record of every rename.

use chrono::{DateTime, Utc};
use ocrname_core::FileOutcome;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenameEvent {
    Renamed { from: String, to: String, text: String },
    WouldRename { from: String, to: String, text: String },
    Unchanged { name: String },
    Skipped { name: String, reason: String },
    Failed { name: String, error: String },
}

impl RenameEvent {
    /// Build the event for a finished file; `text` is the OCR line the name came from.
    pub fn from_outcome(outcome: &FileOutcome, text: Option<&str>) -> Self {
        let text = text.unwrap_or_default().to_string();
        match outcome {
            FileOutcome::Renamed { from, to } => RenameEvent::Renamed {
                from: from.clone(),
                to: to.clone(),
                text,
            },
            FileOutcome::WouldRename { from, to } => RenameEvent::WouldRename {
                from: from.clone(),
                to: to.clone(),
                text,
            },
            FileOutcome::Unchanged { name } => RenameEvent::Unchanged { name: name.clone() },
            FileOutcome::Skipped { name, reason } => RenameEvent::Skipped {
                name: name.clone(),
                reason: reason.to_string(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RenameLogEntry {
    pub timestamp: DateTime<Utc>,
    pub event: RenameEvent,
}

pub struct RenameEventLogger;

impl RenameEventLogger {
    pub fn log(event: RenameEvent) {
        let failed = matches!(event, RenameEvent::Failed { .. });
        let entry = RenameLogEntry {
            timestamp: Utc::now(),
            event,
        };
        let json = serde_json::to_string(&entry).unwrap_or_default();
        if failed {
            warn!(target: "rename_events", entry = %json, "Rename event");
        } else {
            info!(target: "rename_events", entry = %json, "Rename event");
        }
    }
}
