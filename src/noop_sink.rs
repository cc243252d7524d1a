use crate::record::ExceptionRecord;
use crate::sink::{ReportError, ReportingSink};

/// A reporter that simply drops everything.
///
/// Useful for measuring the overhead of the facade itself without any
/// external I/O, and for setups with no crash-reporting backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopReporter;

impl ReportingSink for NoopReporter {
    fn log_message(&self, _text: &str) -> Result<(), ReportError> {
        Ok(())
    }

    fn record_exception(&self, _exception: &ExceptionRecord) -> Result<(), ReportError> {
        Ok(())
    }
}
