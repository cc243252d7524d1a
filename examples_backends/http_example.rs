use std::sync::Arc;
use tokio::time::{sleep, Duration};

use crumb_log::http::{HttpReporter, HttpReporterConfig};
use crumb_log::init::{init_logging_with_config, InitConfig};
use crumb_log::{log_error, log_network, Environment, FacadeConfig, NetworkOptions, Spawned};

#[tokio::main]
async fn main() {
    let config = HttpReporterConfig {
        url: "http://127.0.0.1:8080/api/reports".to_string(),
        api_key: Some("local-dev-key".to_string()),
        service_name: Some("checkout".to_string()),
    };
    let reporter = match Spawned::new(HttpReporter::new(config)) {
        Ok(reporter) => Arc::new(reporter),
        Err(e) => {
            eprintln!("cannot start reporter: {}", e);
            return;
        }
    };

    let init = InitConfig {
        facade: FacadeConfig::default().with_environment(Environment::Staging),
        forward_tracing_events: true,
        ..InitConfig::default()
    };
    let logger = match init_logging_with_config(reporter, init) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("cannot initialize logging: {}", e);
            return;
        }
    };

    log_network!(logger, "POST /orders {}", 201; NetworkOptions::printed());
    log_error!(logger, "payment provider timed out after {}s", 30);
    tracing::error!(order_id = 981, "order left in pending state");

    // Give spawned deliveries a moment before the runtime shuts down.
    sleep(Duration::from_secs(2)).await;
}
