use crate::record::ExceptionRecord;
use crate::sink::{ReportError, ReportingSink};

/// Target used for every event emitted by [`TracingReporter`].
pub const REPORT_TARGET: &str = "crumb_log::report";

/// Relays reports as `tracing` events, so whatever subscriber the process
/// installed (fmt, a file appender, an OpenTelemetry exporter) becomes the
/// reporting backend.
///
/// Log-channel messages are emitted at `INFO`, exception records at
/// `ERROR` with `name` and `reason` fields.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingReporter;

impl ReportingSink for TracingReporter {
    fn log_message(&self, text: &str) -> Result<(), ReportError> {
        tracing::info!(target: "crumb_log::report", "{}", text);
        Ok(())
    }

    fn record_exception(&self, exception: &ExceptionRecord) -> Result<(), ReportError> {
        tracing::error!(
            target: "crumb_log::report",
            name = %exception.name,
            reason = %exception.reason,
            "exception recorded"
        );
        Ok(())
    }
}
