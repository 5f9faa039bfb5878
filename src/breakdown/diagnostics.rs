//! Diagnostics collaborator
//!
//! The engine never fails, but some inputs are worth telling someone about.
//! Those go through [`DiagnosticsReporter`] so callers can route them to
//! their own telemetry; the default implementation logs through `tracing`.

/// Receives non-fatal findings from the breakdown engine
#[cfg_attr(test, mockall::automock)]
pub trait DiagnosticsReporter {
    /// The runner reported an overall status code with no known mapping
    fn report_unrecognized_status(&self, raw_status: &str);
}

/// Reporter that emits a `tracing` warning per finding
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl DiagnosticsReporter for TracingReporter {
    fn report_unrecognized_status(&self, raw_status: &str) {
        tracing::warn!(
            status = raw_status,
            "Unrecognized deployment status, treating as in progress"
        );
    }
}
