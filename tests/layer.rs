use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};

use crumb_log::layer::CrashReportLayer;
use crumb_log::{Environment, ExceptionRecord, FacadeConfig, ReportError, ReportingSink, TracingReporter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

#[derive(Default)]
struct RecordingReporter {
    messages: Mutex<Vec<String>>,
    exceptions: Mutex<Vec<ExceptionRecord>>,
}

impl ReportingSink for RecordingReporter {
    fn log_message(&self, text: &str) -> Result<(), ReportError> {
        self.messages.lock().unwrap().push(text.to_string());
        Ok(())
    }

    fn record_exception(&self, exception: &ExceptionRecord) -> Result<(), ReportError> {
        self.exceptions.lock().unwrap().push(exception.clone());
        Ok(())
    }
}

fn config() -> FacadeConfig {
    FacadeConfig::default().with_environment(Environment::Staging)
}

#[test]
fn error_events_become_exceptions() {
    let reporter = Arc::new(RecordingReporter::default());
    let layer = CrashReportLayer::new(reporter.clone(), config());
    let forwarded = Arc::clone(&layer.forwarded_events);
    let subscriber = Registry::default().with(layer);

    tracing::subscriber::with_default(subscriber, || {
        tracing::error!(user_id = 42, reason = "invalid password", "authentication failed");
    });

    let exceptions = reporter.exceptions.lock().unwrap();
    assert_eq!(exceptions.len(), 1);
    assert_eq!(exceptions[0].name, "log error at staging");
    assert!(exceptions[0].reason.contains("message=authentication failed"), "{}", exceptions[0].reason);
    assert!(exceptions[0].reason.contains("file=tests > layer.rs"));
    assert!(exceptions[0].reason.contains(r#""user_id":42"#));
    assert!(exceptions[0].reason.contains(r#""reason":"invalid password""#));
    assert_eq!(forwarded.load(Ordering::Relaxed), 1);
}

#[test]
fn info_and_warn_become_log_messages() {
    let reporter = Arc::new(RecordingReporter::default());
    let subscriber = Registry::default().with(CrashReportLayer::new(reporter.clone(), config()));

    tracing::subscriber::with_default(subscriber, || {
        tracing::info!("starting service");
        tracing::warn!(retries = 3u64, "slow upstream");
        tracing::debug!("ignored");
        tracing::trace!("ignored");
    });

    let messages = reporter.messages.lock().unwrap();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].starts_with("log from tracing level=INFO "));
    assert!(messages[0].contains("message=starting service"));
    assert!(messages[1].starts_with("log from tracing level=WARN "));
    assert!(messages[1].contains(r#""retries":3"#));
    assert!(reporter.exceptions.lock().unwrap().is_empty());
}

#[test]
fn own_events_are_not_fed_back() {
    let reporter = Arc::new(RecordingReporter::default());
    let subscriber = Registry::default().with(CrashReportLayer::new(reporter.clone(), config()));

    tracing::subscriber::with_default(subscriber, || {
        TracingReporter
            .record_exception(&ExceptionRecord::new("log error at staging", "boom"))
            .unwrap();
        TracingReporter.log_message("hello").unwrap();
    });

    assert!(reporter.messages.lock().unwrap().is_empty());
    assert!(reporter.exceptions.lock().unwrap().is_empty());
}

#[test]
fn failed_deliveries_are_counted() {
    struct Offline;

    impl ReportingSink for Offline {
        fn log_message(&self, _text: &str) -> Result<(), ReportError> {
            Err(ReportError::Unavailable("offline".to_string()))
        }

        fn record_exception(&self, _exception: &ExceptionRecord) -> Result<(), ReportError> {
            Err(ReportError::Unavailable("offline".to_string()))
        }
    }

    let layer = CrashReportLayer::new(Arc::new(Offline), config());
    let failed = Arc::clone(&layer.failed_events);
    let subscriber = Registry::default().with(layer);

    tracing::subscriber::with_default(subscriber, || {
        tracing::error!("lost");
        tracing::info!("lost too");
    });

    assert_eq!(failed.load(Ordering::Relaxed), 2);
}

#[test]
fn panicking_sink_does_not_reach_the_caller() {
    struct Exploding;

    impl ReportingSink for Exploding {
        fn log_message(&self, _text: &str) -> Result<(), ReportError> {
            panic!("reporter blew up");
        }

        fn record_exception(&self, _exception: &ExceptionRecord) -> Result<(), ReportError> {
            panic!("reporter blew up");
        }
    }

    let layer = CrashReportLayer::new(Arc::new(Exploding), config());
    let failed = Arc::clone(&layer.failed_events);
    let subscriber = Registry::default().with(layer);

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        tracing::subscriber::with_default(subscriber, || {
            tracing::error!("checkout failed");
            tracing::warn!("checkout slow");
        });
    }));

    assert!(outcome.is_ok());
    assert_eq!(failed.load(Ordering::Relaxed), 2);
}

#[test]
fn crates_sharing_the_name_prefix_are_forwarded() {
    let reporter = Arc::new(RecordingReporter::default());
    let layer = CrashReportLayer::new(reporter.clone(), config());
    let forwarded = Arc::clone(&layer.forwarded_events);
    let subscriber = Registry::default().with(layer);

    tracing::subscriber::with_default(subscriber, || {
        tracing::error!(target: "crumb_logger_app::orders", "order lost");
        tracing::error!(target: "crumb_log", "internal");
        tracing::error!(target: "crumb_log::facade", "internal");
    });

    assert_eq!(forwarded.load(Ordering::Relaxed), 1);
    let exceptions = reporter.exceptions.lock().unwrap();
    assert_eq!(exceptions.len(), 1);
    assert!(exceptions[0].reason.contains("target=crumb_logger_app::orders"));
}
