//! CLI output: error mapping and exit codes.

use crate::error::ApiError;

/// Exit status: nothing to report.
pub const EXIT_OK: i32 = 0;
/// Exit status: a command failed.
pub const EXIT_ERROR: i32 = 1;
/// Exit status: the check detected changes.
pub const EXIT_CHANGES: i32 = 2;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Storage(inner) => format!("Failed to persist baseline: {}", inner),
        other => other.to_string(),
    }
}
