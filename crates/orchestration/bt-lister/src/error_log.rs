//! Error reporting for failed listings.

use bt_error::BtError;
use tracing::error;

/// Receives listing failures before they are returned to the caller.
///
/// Reporting is fire-and-forget: implementations must not fail or panic.
pub trait ErrorLog: Send + Sync {
    /// Report that `operation` failed with `error`.
    fn log_error(&self, operation: &str, error: &BtError);
}

/// [`ErrorLog`] that emits a `tracing` error event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorLog;

impl ErrorLog for TracingErrorLog {
    fn log_error(&self, operation: &str, error: &BtError) {
        error!(operation = operation, error = %error, "Listing failed");
    }
}
