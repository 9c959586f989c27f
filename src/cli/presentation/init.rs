//! Init command presentation.

use crate::snapshot::Snapshot;
use std::path::Path;

pub fn format_init_summary(
    snapshot: &Snapshot,
    target: &Path,
    baseline_path: &Path,
    created_target: bool,
    force: bool,
) -> String {
    let mut output = String::new();
    if created_target {
        output.push_str(&format!("Created target directory: {}\n", target.display()));
    }
    let verb = if force { "Rebuilt" } else { "Recorded" };
    output.push_str(&format!(
        "{} baseline of {} file(s) at {}",
        verb,
        snapshot.len(),
        baseline_path.display()
    ));
    if snapshot.is_empty() {
        output.push_str(&format!(
            "\n'{}' is empty. Files added later will be reported as added.",
            target.display()
        ));
    }
    output
}
