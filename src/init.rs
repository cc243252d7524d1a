use crate::backend::{reporter_from_env, BackendBuildError};
use crate::env::{ConfigError, FacadeConfig};
use crate::facade::LogFacade;
use crate::layer::CrashReportLayer;
use crate::sink::ReportingSink;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

/// Startup options for [`init_logging_with_config`].
///
/// **Fields**
/// - `facade`: environment tag and breadcrumb root marker for the facade.
/// - `enable_stdout`: install a `tracing_subscriber::fmt` layer so
///   `tracing` events (including [`TracingReporter`] output) reach the
///   terminal.
/// - `forward_tracing_events`: install a [`CrashReportLayer`] so the
///   application's own `tracing` events are relayed to the reporter too.
///
/// With a [`TracingReporter`] and `enable_stdout` both on, every facade
/// call reaches the terminal twice: once as the console block and once as
/// the fmt line for the relayed summary. That is the default pairing of
/// [`init_logging_from_env`]. Set `enable_stdout: false` to keep only the
/// console blocks, or install another subscriber layer as the report
/// destination.
///
/// [`TracingReporter`]: crate::tracing_sink::TracingReporter
#[derive(Clone, Debug)]
pub struct InitConfig {
    pub facade: FacadeConfig,
    pub enable_stdout: bool,
    pub forward_tracing_events: bool,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            facade: FacadeConfig::default(),
            enable_stdout: true,
            forward_tracing_events: false,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum InitError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Backend(#[from] BackendBuildError),

    #[error("a global tracing subscriber is already installed")]
    SubscriberAlreadySet(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Install the global `tracing` subscriber and build the facade.
///
/// **Parameters**
/// - `reporter`: crash-reporting backend shared by the facade and, when
///   enabled, the [`CrashReportLayer`].
/// - `config`: [`InitConfig`].
///
/// **Errors**
///
/// Fails if a global subscriber was already installed.
pub fn init_logging_with_config(
    reporter: Arc<dyn ReportingSink>,
    config: InitConfig,
) -> Result<LogFacade, InitError> {
    let forward = config
        .forward_tracing_events
        .then(|| CrashReportLayer::new(Arc::clone(&reporter), config.facade.clone()));
    let fmt_layer = config.enable_stdout.then(|| tracing_subscriber::fmt::layer());

    // `Option<L>` is itself a layer, so one subscriber type covers every
    // combination.
    let subscriber = Registry::default().with(forward).with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber)?;

    tracing::debug!(
        environment = config.facade.environment_tag(),
        root_marker = %config.facade.root_marker,
        "crumb-log initialized"
    );
    Ok(LogFacade::new(config.facade, reporter))
}

/// Initialize with [`InitConfig::default`] and the given reporter.
pub fn init_logging(reporter: Arc<dyn ReportingSink>) -> Result<LogFacade, InitError> {
    init_logging_with_config(reporter, InitConfig::default())
}

/// Initialize entirely from `CRUMB_LOG_*` environment variables.
///
/// Call from within a tokio runtime when the DSN selects the HTTP
/// reporter.
pub fn init_logging_from_env() -> Result<LogFacade, InitError> {
    let config = InitConfig {
        facade: FacadeConfig::from_env()?,
        ..InitConfig::default()
    };
    init_logging_with_config(reporter_from_env()?, config)
}
