//! Scan command presentation: digest listing and skipped entries.

use crate::error::ApiError;
use crate::error::DigestFailureKind;
use crate::tree::ScanReport;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;

pub fn format_scan_text(report: &ScanReport) -> String {
    if report.snapshot.is_empty() && report.skipped.is_empty() {
        return if report.root_exists {
            "No files found.".to_string()
        } else {
            "Target directory does not exist.".to_string()
        };
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Path", "Digest"]);
    for (path, digest) in &report.snapshot {
        table.add_row(vec![path, digest]);
    }

    let mut output = table.to_string();
    output.push_str(&format!("\n{} file(s) hashed", report.snapshot.len()));

    if !report.skipped.is_empty() {
        output.push_str(&format!("\n\nSkipped ({}):", report.skipped.len()));
        for entry in &report.skipped {
            output.push_str(&format!(
                "\n  - {} ({})",
                entry.path.display(),
                kind_label(entry.kind)
            ));
        }
    }
    output
}

fn kind_label(kind: DigestFailureKind) -> &'static str {
    match kind {
        DigestFailureKind::Vanished => "vanished",
        DigestFailureKind::Unreadable => "unreadable",
        DigestFailureKind::InvalidName => "invalid name",
    }
}

pub fn format_scan_json(report: &ScanReport) -> Result<String, ApiError> {
    let skipped: Vec<serde_json::Value> = report
        .skipped
        .iter()
        .map(|entry| {
            serde_json::json!({
                "path": entry.path.display().to_string(),
                "kind": kind_label(entry.kind),
                "reason": entry.reason,
            })
        })
        .collect();
    let value = serde_json::json!({
        "files": report.snapshot,
        "skipped": skipped,
    });
    serde_json::to_string_pretty(&value)
        .map_err(|e| ApiError::ConfigError(format!("Failed to render JSON: {}", e)))
}
