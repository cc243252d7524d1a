use std::sync::Arc;

use crate::env::{env_opt, env_or, CRUMB_LOG_API_KEY_ENV, CRUMB_LOG_REPORTER_DSN_ENV, CRUMB_LOG_SERVICE_NAME_ENV};
use crate::noop_sink::NoopReporter;
use crate::sink::ReportingSink;
use crate::tracing_sink::TracingReporter;

/// Reporting backends that can be selected via DSN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Noop,
    Tracing,
    Http,
}

/// Reporter configuration built from a DSN plus optional credentials.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Selected backend implementation.
    pub kind: BackendKind,
    /// Raw DSN that was used to construct this config.
    pub dsn: String,
    pub api_key: Option<String>,
    pub service_name: Option<String>,
}

impl BackendConfig {
    pub fn new(kind: BackendKind, dsn: impl Into<String>) -> Self {
        BackendConfig {
            kind,
            dsn: dsn.into(),
            api_key: None,
            service_name: None,
        }
    }
}

pub const DEFAULT_REPORTER_DSN: &str = "tracing://";

/// Parse a DSN string and infer the backend kind from its scheme.
///
/// Examples:
/// - "noop://"
/// - "tracing://"
/// - "https://crash.example.com/api/reports"
pub fn parse_dsn(dsn: &str) -> Result<BackendConfig, DsnError> {
    let lower = dsn.trim().to_ascii_lowercase();

    if lower.starts_with("noop://") {
        Ok(BackendConfig::new(BackendKind::Noop, dsn))
    } else if lower.starts_with("tracing://") {
        Ok(BackendConfig::new(BackendKind::Tracing, dsn))
    } else if lower.starts_with("http://") || lower.starts_with("https://") {
        Ok(BackendConfig::new(BackendKind::Http, dsn.trim()))
    } else {
        Err(DsnError::UnknownScheme(dsn.to_string()))
    }
}

/// Error type returned when parsing a DSN.
#[derive(thiserror::Error, Debug)]
pub enum DsnError {
    #[error("unknown or unsupported reporter DSN scheme: {0:?}")]
    UnknownScheme(String),
}

/// Error type returned when building a reporter from configuration.
#[derive(thiserror::Error, Debug)]
pub enum BackendBuildError {
    #[error(transparent)]
    Dsn(#[from] DsnError),

    #[error("http feature is not enabled")]
    HttpFeatureDisabled,

    #[error("cannot start http reporter: {0}")]
    Runtime(#[from] crate::sink::ReportError),
}

/// Create a concrete [`ReportingSink`] from a [`BackendConfig`].
///
/// The HTTP backend must be built from within a tokio runtime; its reports
/// are delivered on that runtime.
pub fn make_reporter_from_config(cfg: &BackendConfig) -> Result<Arc<dyn ReportingSink>, BackendBuildError> {
    match cfg.kind {
        BackendKind::Noop => Ok(Arc::new(NoopReporter)),
        BackendKind::Tracing => Ok(Arc::new(TracingReporter)),
        BackendKind::Http => {
            #[cfg(feature = "http")]
            {
                use crate::http::{HttpReporter, HttpReporterConfig};
                use crate::sink::Spawned;

                let config = HttpReporterConfig {
                    url: cfg.dsn.clone(),
                    api_key: cfg.api_key.clone(),
                    service_name: cfg.service_name.clone(),
                };
                let reporter = Spawned::new(HttpReporter::new(config))?;
                Ok(Arc::new(reporter) as Arc<dyn ReportingSink>)
            }

            #[cfg(not(feature = "http"))]
            {
                let _ = cfg;
                Err(BackendBuildError::HttpFeatureDisabled)
            }
        }
    }
}

/// Build the reporter named by `CRUMB_LOG_REPORTER_DSN` (default
/// `tracing://`), with `CRUMB_LOG_API_KEY` and `CRUMB_LOG_SERVICE_NAME`.
pub fn reporter_from_env() -> Result<Arc<dyn ReportingSink>, BackendBuildError> {
    let mut cfg = parse_dsn(&env_or(CRUMB_LOG_REPORTER_DSN_ENV, DEFAULT_REPORTER_DSN))?;
    cfg.api_key = env_opt(CRUMB_LOG_API_KEY_ENV);
    cfg.service_name = env_opt(CRUMB_LOG_SERVICE_NAME_ENV);
    make_reporter_from_config(&cfg)
}
