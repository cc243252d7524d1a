//! Process-wide configuration and the environment variables it is loaded
//! from.
//!
//! The facade never reads the environment itself; it is handed a
//! [`FacadeConfig`] at construction.

use std::fmt;
use std::str::FromStr;

/// Deployment environment tag, e.g. `production`.
pub const CRUMB_LOG_ENVIRONMENT_ENV: &str = "CRUMB_LOG_ENVIRONMENT";

/// Directory name that breadcrumbs are trimmed to.
pub const CRUMB_LOG_ROOT_MARKER_ENV: &str = "CRUMB_LOG_ROOT_MARKER";

/// Reporter DSN, e.g. `https://crash.example.com/api/reports`.
pub const CRUMB_LOG_REPORTER_DSN_ENV: &str = "CRUMB_LOG_REPORTER_DSN";

/// Optional API key for the HTTP reporter.
pub const CRUMB_LOG_API_KEY_ENV: &str = "CRUMB_LOG_API_KEY";

/// Optional logical service name attached to HTTP reports.
pub const CRUMB_LOG_SERVICE_NAME_ENV: &str = "CRUMB_LOG_SERVICE_NAME";

pub const DEFAULT_ROOT_MARKER: &str = "src";

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read an environment variable, treating unset and empty alike.
pub fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Debug,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Debug => "debug",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Environment::Debug),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            _ => Err(ConfigError::UnknownEnvironment(s.to_string())),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("unknown environment tag {0:?} (expected debug, staging or production)")]
    UnknownEnvironment(String),
}

/// Settings the facade reads on every call. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacadeConfig {
    pub environment: Environment,
    /// Directory name breadcrumbs are trimmed to.
    pub root_marker: String,
}

impl Default for FacadeConfig {
    fn default() -> Self {
        FacadeConfig {
            environment: Environment::default(),
            root_marker: DEFAULT_ROOT_MARKER.to_string(),
        }
    }
}

impl FacadeConfig {
    /// Load from `CRUMB_LOG_ENVIRONMENT` and `CRUMB_LOG_ROOT_MARKER`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = env_or(CRUMB_LOG_ENVIRONMENT_ENV, Environment::default().as_str()).parse()?;
        let root_marker = env_or(CRUMB_LOG_ROOT_MARKER_ENV, DEFAULT_ROOT_MARKER);
        Ok(FacadeConfig {
            environment,
            root_marker,
        })
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_root_marker(mut self, root_marker: impl Into<String>) -> Self {
        self.root_marker = root_marker.into();
        self
    }

    pub fn environment_tag(&self) -> &'static str {
        self.environment.as_str()
    }
}
