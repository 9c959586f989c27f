//! CLI domain: parse, route, output, and presentation only.
//! No domain logic; the route table dispatches to the integrity API.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::{map_error, EXIT_CHANGES, EXIT_ERROR, EXIT_OK};
pub use parse::{Cli, Commands, OutputFormat};
pub use presentation::{
    format_check_json, format_check_text, format_diff_text, format_init_summary,
    format_resolution_note, format_scan_json, format_scan_text,
};
pub use route::{ChangePrompt, CommandOutput, PromptReply, RunContext, TerminalPrompt};
