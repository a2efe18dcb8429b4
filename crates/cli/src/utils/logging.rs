//! Command execution logging
//!
//! Human-facing output goes to stdout in the handlers; these records go to
//! the tracing subscriber on stderr, one per command execution.

use std::time::Duration;

use tracing::{info, warn};

use fieldlog_domain::FieldLogError;

/// Log one command execution with its outcome and duration.
#[inline]
pub fn log_command_execution(
    command: &str,
    elapsed: Duration,
    success: bool,
    error: Option<&'static str>,
) {
    let duration_ms = elapsed.as_millis() as u64;
    if success {
        info!(command, duration_ms, "command_execution_success");
    } else {
        let error = error.unwrap_or("unknown");
        warn!(command, duration_ms, error, "command_execution_failure");
    }
}

/// Map an error to a stable label for log fields.
#[inline]
pub fn error_label(error: &FieldLogError) -> &'static str {
    match error {
        FieldLogError::Database(_) => "database",
        FieldLogError::Storage(_) => "storage",
        FieldLogError::Config(_) => "config",
        FieldLogError::NotFound(_) => "not_found",
        FieldLogError::InvalidInput(_) => "invalid_input",
        FieldLogError::Internal(_) => "internal",
    }
}
