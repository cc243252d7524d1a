use std::sync::Arc;

use crumb_log::init::init_logging;
use crumb_log::{view_logger, LogFacade, TracingReporter};

struct CartScreen {
    items: Vec<&'static str>,
}

impl CartScreen {
    fn render(&self, logger: &LogFacade) {
        let _view = view_logger!().enter(logger);
        crumb_log::log_info!(logger, crumb_log::payload::Joined(&self.items));
    }
}

fn main() {
    let logger = match init_logging(Arc::new(TracingReporter)) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("cannot initialize logging: {}", e);
            return;
        }
    };
    let screen = CartScreen {
        items: vec!["coffee", "filters"],
    };
    screen.render(&logger);

    // Toolkits with explicit callbacks drive the logger directly.
    let settings = view_logger!();
    settings.on_appear(&logger);
    settings.on_disappear(&logger);
}
