//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ReportError, Severity};

/// Map engine errors to a string for CLI output.
pub fn map_error(e: &ReportError) -> String {
    match e.severity() {
        Severity::Fatal => format!("Report run aborted: {}", e),
        Severity::Recoverable => e.to_string(),
    }
}
