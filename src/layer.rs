use crate::breadcrumb::breadcrumb;
use crate::env::FacadeConfig;
use crate::record::{exception_name, ExceptionRecord};
use crate::sink::ReportingSink;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// `tracing_subscriber` layer that relays ordinary `tracing` events to a
/// [`ReportingSink`].
///
/// `ERROR` events become exception records, `WARN` and `INFO` events
/// become log-channel messages, anything more verbose is ignored. Events
/// emitted by this crate itself are skipped so a [`TracingReporter`]
/// behind the layer cannot feed back into it.
///
/// [`TracingReporter`]: crate::tracing_sink::TracingReporter
pub struct CrashReportLayer {
    sink: Arc<dyn ReportingSink>,
    config: FacadeConfig,
    /// Events relayed to the sink.
    pub forwarded_events: Arc<AtomicU64>,
    /// Events the sink refused or panicked on.
    pub failed_events: Arc<AtomicU64>,
}

impl CrashReportLayer {
    pub fn new(sink: Arc<dyn ReportingSink>, config: FacadeConfig) -> Self {
        CrashReportLayer {
            sink,
            config,
            forwarded_events: Arc::new(AtomicU64::new(0)),
            failed_events: Arc::new(AtomicU64::new(0)),
        }
    }

    fn describe(&self, event: &Event<'_>) -> String {
        let mut fields = BTreeMap::new();
        let mut message: Option<String> = None;
        let mut visitor = FieldVisitor {
            fields: &mut fields,
            message: &mut message,
        };
        event.record(&mut visitor);

        let meta = event.metadata();
        let file = meta
            .file()
            .map(|file| breadcrumb(file, &self.config.root_marker))
            .unwrap_or_else(|| "<unknown>".to_string());
        let mut text = format!(
            "target={} file={} Line={} message={}",
            meta.target(),
            file,
            meta.line().unwrap_or_default(),
            message.unwrap_or_default(),
        );
        if !fields.is_empty() {
            let json = serde_json::to_string(&fields).unwrap_or_else(|_| "{}".to_string());
            text.push_str(" fields=");
            text.push_str(&json);
        }
        text
    }
}

impl<S> Layer<S> for CrashReportLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        let level = *meta.level();
        if level > Level::INFO || is_own_target(meta.target()) {
            return;
        }

        let text = self.describe(event);
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            if level == Level::ERROR {
                let exception = ExceptionRecord::new(exception_name(self.config.environment_tag()), text);
                self.sink.record_exception(&exception)
            } else {
                self.sink.log_message(&format!("log from tracing level={} {}", level, text))
            }
        }));

        match result {
            Ok(Ok(())) => {
                self.forwarded_events.fetch_add(1, Ordering::Relaxed);
            }
            Ok(Err(_)) | Err(_) => {
                self.failed_events.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}

/// Events from this crate's own modules, never from crates that merely
/// share the prefix.
fn is_own_target(target: &str) -> bool {
    target == "crumb_log" || target.starts_with("crumb_log::")
}

use tracing::field::{Field, Visit};

pub struct FieldVisitor<'a> {
    pub fields: &'a mut BTreeMap<String, serde_json::Value>,
    pub message: &'a mut Option<String>,
}

impl<'a> Visit for FieldVisitor<'a> {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            *self.message = Some(value.to_string());
        } else {
            self.fields.insert(field.name().to_string(), serde_json::Value::String(value.to_string()));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.insert(field.name().to_string(), serde_json::Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.insert(field.name().to_string(), serde_json::Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.insert(field.name().to_string(), serde_json::Value::from(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.message = Some(format!("{:?}", value));
        } else {
            self.fields.insert(field.name().to_string(), serde_json::Value::String(format!("{:?}", value)));
        }
    }
}
