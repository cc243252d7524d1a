use std::sync::{Mutex, MutexGuard, PoisonError};

use crumb_log::backend::{reporter_from_env, BackendBuildError};
use crumb_log::env::{
    ConfigError, CRUMB_LOG_API_KEY_ENV, CRUMB_LOG_ENVIRONMENT_ENV, CRUMB_LOG_REPORTER_DSN_ENV,
    CRUMB_LOG_ROOT_MARKER_ENV, CRUMB_LOG_SERVICE_NAME_ENV,
};
use crumb_log::{Environment, FacadeConfig};

// Every test here mutates process-wide environment variables.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clean_env() -> MutexGuard<'static, ()> {
    let guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    for key in [
        CRUMB_LOG_ENVIRONMENT_ENV,
        CRUMB_LOG_ROOT_MARKER_ENV,
        CRUMB_LOG_REPORTER_DSN_ENV,
        CRUMB_LOG_API_KEY_ENV,
        CRUMB_LOG_SERVICE_NAME_ENV,
    ] {
        std::env::remove_var(key);
    }
    guard
}

#[test]
fn defaults_when_unset() {
    let _env = clean_env();

    let config = FacadeConfig::from_env().unwrap();
    assert_eq!(config.environment, Environment::Debug);
    assert_eq!(config.root_marker, "src");
    assert_eq!(config, FacadeConfig::default());
}

#[test]
fn overrides_from_variables() {
    let _env = clean_env();
    std::env::set_var(CRUMB_LOG_ENVIRONMENT_ENV, "Production");
    std::env::set_var(CRUMB_LOG_ROOT_MARKER_ENV, "SetupProject");

    let config = FacadeConfig::from_env().unwrap();
    assert_eq!(config.environment_tag(), "production");
    assert_eq!(config.root_marker, "SetupProject");
}

#[test]
fn unknown_environment_is_an_error() {
    let _env = clean_env();
    std::env::set_var(CRUMB_LOG_ENVIRONMENT_ENV, "qa");

    assert!(matches!(
        FacadeConfig::from_env(),
        Err(ConfigError::UnknownEnvironment(tag)) if tag == "qa"
    ));
}

#[test]
fn reporter_defaults_to_tracing() {
    let _env = clean_env();

    assert!(reporter_from_env().is_ok());
}

#[test]
fn reporter_dsn_is_honoured() {
    let _env = clean_env();
    std::env::set_var(CRUMB_LOG_REPORTER_DSN_ENV, "noop://");
    assert!(reporter_from_env().is_ok());

    std::env::set_var(CRUMB_LOG_REPORTER_DSN_ENV, "kafka://broker/topic");
    assert!(matches!(reporter_from_env(), Err(BackendBuildError::Dsn(_))));
}

#[cfg(feature = "http")]
#[test]
fn http_dsn_needs_a_runtime() {
    let _env = clean_env();
    std::env::set_var(CRUMB_LOG_REPORTER_DSN_ENV, "https://crash.example.com/api/reports");
    std::env::set_var(CRUMB_LOG_SERVICE_NAME_ENV, "checkout");

    assert!(matches!(reporter_from_env(), Err(BackendBuildError::Runtime(_))));
}
