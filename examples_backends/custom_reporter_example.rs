use std::sync::Arc;

use crumb_log::init::init_logging;
use crumb_log::{log_error, log_info, ExceptionRecord, ReportError, ReportingSink};

/// Example of integrating a crash-reporting service this crate has no
/// built-in reporter for, by implementing `ReportingSink` directly.
/// Imagine this calls the vendor's SDK.
struct VendorSdkReporter;

impl ReportingSink for VendorSdkReporter {
    fn log_message(&self, text: &str) -> Result<(), ReportError> {
        println!("[vendor-sdk] log: {}", text);
        Ok(())
    }

    fn record_exception(&self, exception: &ExceptionRecord) -> Result<(), ReportError> {
        println!("[vendor-sdk] exception {:?}: {}", exception.name, exception.reason);
        Ok(())
    }
}

fn main() {
    let reporter: Arc<dyn ReportingSink> = Arc::new(VendorSdkReporter);

    let logger = match init_logging(reporter) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("cannot initialize logging: {}", e);
            return;
        }
    };

    log_info!(logger, "custom reporter example started");
    log_error!(logger, "simulated error sent via custom reporter");
}
