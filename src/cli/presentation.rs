//! CLI presentation: text and json formatters per command.

mod check;
mod init;
mod scan;

pub use check::{format_check_json, format_check_text, format_diff_text, format_resolution_note};
pub use init::format_init_summary;
pub use scan::{format_scan_json, format_scan_text};

use owo_colors::OwoColorize;

/// Alert styles used across reports
#[derive(Debug, Clone, Copy)]
pub(crate) enum Tone {
    Good,
    Warn,
    Bad,
    Dim,
}

/// Apply `tone` to `text` when `color` is enabled.
pub(crate) fn paint(text: &str, tone: Tone, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    match tone {
        Tone::Good => text.green().to_string(),
        Tone::Warn => text.yellow().bold().to_string(),
        Tone::Bad => text.red().bold().to_string(),
        Tone::Dim => text.dimmed().to_string(),
    }
}
