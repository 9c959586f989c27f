//! Check command presentation: per-path change report.

use super::{paint, Tone};
use crate::api::{CheckOutcome, PriorBaseline};
use crate::error::ApiError;
use crate::reconcile::DiffResult;
use std::path::Path;

pub fn format_check_text(outcome: &CheckOutcome, target: &Path, color: bool) -> String {
    match outcome {
        CheckOutcome::BaselineJustCreated { snapshot, previous } => {
            let mut output = String::new();
            if let PriorBaseline::Corrupted { reason } = previous {
                output.push_str(&paint(
                    &format!("Baseline was corrupted ({}); it has been rebuilt.\n", reason),
                    Tone::Warn,
                    color,
                ));
            } else {
                output.push_str("No baseline found; a new one was created.\n");
            }
            output.push_str(&format!(
                "Recorded {} file(s) under {}",
                snapshot.len(),
                target.display()
            ));
            output
        }
        CheckOutcome::Compared { diff, .. } => format_diff_text(diff, target, color),
    }
}

/// Report every added, removed and modified path of `diff`.
pub fn format_diff_text(diff: &DiffResult, target: &Path, color: bool) -> String {
    let mut lines = Vec::new();

    if diff.is_total_loss() {
        lines.push(paint(
            &format!(
                "WARNING: all {} baselined file(s) are missing from {}",
                diff.removed.len(),
                target.display()
            ),
            Tone::Bad,
            color,
        ));
    }

    for path in &diff.removed {
        lines.push(format!("{} {}", paint("[REMOVED] ", Tone::Bad, color), path));
    }
    for (path, change) in &diff.modified {
        lines.push(format!("{} {}", paint("[MODIFIED]", Tone::Warn, color), path));
        lines.push(paint(&format!("    old: {}", change.old), Tone::Dim, color));
        lines.push(paint(&format!("    new: {}", change.new), Tone::Dim, color));
    }
    for path in &diff.added {
        lines.push(format!("{} {}", paint("[ADDED]   ", Tone::Warn, color), path));
    }

    if diff.has_changes() {
        lines.push(format!(
            "\n{} change(s): {} added, {} removed, {} modified; {} unchanged",
            diff.change_count(),
            diff.added.len(),
            diff.removed.len(),
            diff.modified.len(),
            diff.unchanged.len()
        ));
    } else {
        lines.push(paint(
            &format!(
                "All {} monitored file(s) match the baseline.",
                diff.unchanged.len()
            ),
            Tone::Good,
            color,
        ));
    }
    lines.join("\n")
}

pub fn format_check_json(outcome: &CheckOutcome, baseline_updated: bool) -> Result<String, ApiError> {
    let value = match outcome {
        CheckOutcome::BaselineJustCreated { snapshot, previous } => {
            let previous = match previous {
                PriorBaseline::Absent => serde_json::json!({ "kind": "absent" }),
                PriorBaseline::Corrupted { reason } => {
                    serde_json::json!({ "kind": "corrupted", "reason": reason })
                }
            };
            serde_json::json!({
                "state": "baseline_created",
                "previous": previous,
                "files": snapshot.len(),
            })
        }
        CheckOutcome::Compared { diff, .. } => {
            let state = if diff.has_changes() {
                "changes_detected"
            } else {
                "consistent"
            };
            serde_json::json!({
                "state": state,
                "total_loss": diff.is_total_loss(),
                "baseline_updated": baseline_updated,
                "added": diff.added,
                "removed": diff.removed,
                "modified": diff.modified,
                "unchanged": diff.unchanged.len(),
            })
        }
    };
    serde_json::to_string_pretty(&value)
        .map_err(|e| ApiError::ConfigError(format!("Failed to render JSON: {}", e)))
}

/// Note appended after the user (or a flag) decided about promotion.
pub fn format_resolution_note(baseline_updated: bool, baseline_path: &Path) -> String {
    if baseline_updated {
        format!("Baseline updated at {}.", baseline_path.display())
    } else {
        "Baseline not updated; the previous state is still monitored.".to_string()
    }
}
