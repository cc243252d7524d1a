use async_trait::async_trait;
use std::sync::Arc;
use tokio::runtime::Handle;

use crate::record::ExceptionRecord;

/// Error type returned by reporting backends.
///
/// The facade never surfaces these to its callers; they only show up in
/// the crate's own debug diagnostics.
#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("reporting backend unavailable: {0}")]
    Unavailable(String),

    #[error("no tokio runtime available to deliver the report")]
    NoRuntime,

    #[error("backend rejected report with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),

    #[cfg(feature = "http")]
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Remote crash/error-reporting destination.
///
/// Both calls are best-effort and must return quickly; a backend that does
/// network I/O should hand the work off (see [`Spawned`]).
pub trait ReportingSink: Send + Sync {
    /// Plain log channel, used by `info` and `network`.
    fn log_message(&self, text: &str) -> Result<(), ReportError>;

    /// Exception channel, surfaced as an actionable event by the backend.
    fn record_exception(&self, exception: &ExceptionRecord) -> Result<(), ReportError>;
}

/// Asynchronous reporting backend, driven through [`Spawned`].
#[async_trait]
pub trait AsyncReporter: Send + Sync + 'static {
    async fn log_message(&self, text: String) -> Result<(), ReportError>;

    async fn record_exception(&self, exception: ExceptionRecord) -> Result<(), ReportError>;
}

/// Bridges an [`AsyncReporter`] to the synchronous [`ReportingSink`]
/// contract by spawning one task per report on a tokio runtime.
///
/// Delivery failures inside the task are logged at debug level and
/// dropped. There is no queue and no retry.
pub struct Spawned<R> {
    reporter: Arc<R>,
    handle: Handle,
}

impl<R: AsyncReporter> Spawned<R> {
    /// Bind to the runtime of the calling context.
    pub fn new(reporter: R) -> Result<Self, ReportError> {
        let handle = Handle::try_current().map_err(|_| ReportError::NoRuntime)?;
        Ok(Self::with_handle(reporter, handle))
    }

    pub fn with_handle(reporter: R, handle: Handle) -> Self {
        Spawned {
            reporter: Arc::new(reporter),
            handle,
        }
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }
}

impl<R: AsyncReporter> ReportingSink for Spawned<R> {
    fn log_message(&self, text: &str) -> Result<(), ReportError> {
        let reporter = Arc::clone(&self.reporter);
        let text = text.to_string();
        self.handle.spawn(async move {
            if let Err(e) = reporter.log_message(text).await {
                tracing::debug!(error = %e, "dropping log message after delivery failure");
            }
        });
        Ok(())
    }

    fn record_exception(&self, exception: &ExceptionRecord) -> Result<(), ReportError> {
        let reporter = Arc::clone(&self.reporter);
        let exception = exception.clone();
        self.handle.spawn(async move {
            if let Err(e) = reporter.record_exception(exception).await {
                tracing::debug!(error = %e, "dropping exception record after delivery failure");
            }
        });
        Ok(())
    }
}
