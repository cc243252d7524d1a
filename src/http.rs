use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Serialize;

use crate::record::ExceptionRecord;
use crate::sink::{AsyncReporter, ReportError};

/// Configuration for [`HttpReporter`].
#[derive(Clone, Debug)]
pub struct HttpReporterConfig {
    /// Ingestion URL without query, e.g. "https://crash.example.com/api/reports"
    pub url: String,
    /// Sent as the `x-api-key` header when present.
    pub api_key: Option<String>,
    /// Appended as the `service` query parameter when present.
    pub service_name: Option<String>,
}

impl HttpReporterConfig {
    pub fn new(url: impl Into<String>) -> Self {
        HttpReporterConfig {
            url: url.into(),
            api_key: None,
            service_name: None,
        }
    }
}

/// Crash-reporting backend that POSTs one JSON document per report.
///
/// This is an [`AsyncReporter`]; wrap it in [`Spawned`](crate::sink::Spawned)
/// to hand it to the facade.
#[derive(Clone)]
pub struct HttpReporter {
    client: Client,
    config: HttpReporterConfig,
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ReportBody<'a> {
    Log {
        timestamp: String,
        text: &'a str,
        service_name: Option<&'a str>,
    },
    Exception {
        timestamp: String,
        name: &'a str,
        reason: &'a str,
        service_name: Option<&'a str>,
    },
}

impl HttpReporter {
    pub fn new(config: HttpReporterConfig) -> Self {
        let client = Client::new();
        Self { client, config }
    }

    pub fn config(&self) -> &HttpReporterConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        let base = self.config.url.trim_end_matches('/');
        match &self.config.service_name {
            Some(service) => format!("{}?service={}", base, urlencoding::encode(service)),
            None => base.to_string(),
        }
    }

    async fn post(&self, body: &ReportBody<'_>) -> Result<(), ReportError> {
        let body = serde_json::to_string(body)?;
        let mut request = self
            .client
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .body(body);
        if let Some(key) = &self.config.api_key {
            request = request.header("x-api-key", key);
        }

        let resp = request.send().await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_else(|_| "<no body>".to_string());
            Err(ReportError::Rejected { status, body })
        }
    }
}

#[async_trait]
impl AsyncReporter for HttpReporter {
    async fn log_message(&self, text: String) -> Result<(), ReportError> {
        self.post(&ReportBody::Log {
            timestamp: Utc::now().to_rfc3339(),
            text: &text,
            service_name: self.config.service_name.as_deref(),
        })
        .await
    }

    async fn record_exception(&self, exception: ExceptionRecord) -> Result<(), ReportError> {
        self.post(&ReportBody::Exception {
            timestamp: Utc::now().to_rfc3339(),
            name: &exception.name,
            reason: &exception.reason,
            service_name: self.config.service_name.as_deref(),
        })
        .await
    }
}
