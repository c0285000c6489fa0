//! Structured logging helpers for the command layer

use std::time::Duration;

use haven_domain::HavenError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Initialise the tracing subscriber (env-filter + fmt).
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Log the outcome of a command execution with structured fields.
///
/// # Parameters
/// * `command` - Logical command identifier (e.g. `"engagement::log_activity"`).
/// * `elapsed` - Duration the command execution took.
/// * `success` - Whether the command completed successfully.
/// * `error_type` - Stable error label when the command failed.
///
/// The helper keeps the command wrappers concise and the log shape uniform.
/// Callers must avoid forwarding sensitive values in `command`.
#[inline]
pub fn log_command_execution(
    command: &str,
    elapsed: Duration,
    success: bool,
    error_type: Option<&str>,
) {
    let duration_ms = elapsed.as_millis() as u64;

    if success {
        info!(command, duration_ms, "command_execution_success");
    } else {
        warn!(command, duration_ms, error_type, "command_execution_failure");
    }
}

/// Convert a `HavenError` into a stable label suitable for logging.
#[inline]
#[must_use]
pub fn error_label(error: &HavenError) -> &'static str {
    match error {
        HavenError::Database(_) => "database",
        HavenError::Config(_) => "config",
        HavenError::Serialization(_) => "serialization",
        HavenError::NotFound(_) => "not_found",
        HavenError::InvalidInput(_) => "invalid_input",
        HavenError::Internal(_) => "internal",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_labels_are_stable() {
        assert_eq!(error_label(&HavenError::Database("boom".into())), "database");
        assert_eq!(error_label(&HavenError::InvalidInput("bad".into())), "invalid_input");
    }
}
