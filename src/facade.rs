use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::console::{ConsoleSink, StdoutConsole};
use crate::env::FacadeConfig;
use crate::record::{ExceptionRecord, LogLevel, LogRecord};
use crate::site::CallSite;
use crate::sink::{ReportError, ReportingSink};

/// Per-call switches for [`LogFacade::network`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkOptions {
    /// Also print a console block. Off by default, network traffic is noisy.
    pub print_to_console: bool,
    /// Escalate through [`LogFacade::error`] as well.
    pub report_as_error: bool,
}

impl NetworkOptions {
    pub fn printed() -> Self {
        NetworkOptions {
            print_to_console: true,
            ..Self::default()
        }
    }

    pub fn escalated() -> Self {
        NetworkOptions {
            report_as_error: true,
            ..Self::default()
        }
    }
}

/// Leveled logging facade.
///
/// Every operation formats a [`LogRecord`] from the payload and the
/// caller's [`CallSite`], writes it to the console sink and relays it to
/// the reporting sink. Reporting is best-effort: errors and panics from
/// the reporting sink are swallowed and never reach the caller.
///
/// A panicking sink still goes through the process panic hook before it
/// is caught, so the default hook prints its `panicked at` line to stderr.
/// Install a quieter hook with [`std::panic::set_hook`] if that matters.
///
/// Use the [`log_info!`](crate::log_info), [`log_network!`](crate::log_network)
/// and [`log_error!`](crate::log_error) macros so the call site is captured
/// at the right place.
#[derive(Clone)]
pub struct LogFacade {
    config: FacadeConfig,
    console: Arc<dyn ConsoleSink>,
    reporter: Arc<dyn ReportingSink>,
}

impl LogFacade {
    /// Facade printing to stdout and reporting to `reporter`.
    pub fn new(config: FacadeConfig, reporter: Arc<dyn ReportingSink>) -> Self {
        LogFacade {
            config,
            console: Arc::new(StdoutConsole),
            reporter,
        }
    }

    pub fn with_console(mut self, console: Arc<dyn ConsoleSink>) -> Self {
        self.console = console;
        self
    }

    pub fn config(&self) -> &FacadeConfig {
        &self.config
    }

    /// General-purpose log: console block plus a log-channel summary.
    pub fn info<T: Display + ?Sized>(&self, payload: &T, site: &CallSite) {
        let record = self.record(LogLevel::Info, payload, site);
        self.relay(|reporter| reporter.log_message(&record.summary()));
        self.console.write_block(&record.console_block());
    }

    /// Network traffic log. Always relayed, printed only on request.
    pub fn network<T: Display + ?Sized>(&self, payload: &T, site: &CallSite, options: NetworkOptions) {
        let record = self.record(LogLevel::Network, payload, site);
        self.relay(|reporter| reporter.log_message(&record.summary()));
        if options.print_to_console {
            self.console.write_block(&record.console_block());
        }

        if options.report_as_error {
            self.error(payload, site);
        }
    }

    /// Error log: exception record to the reporter, error block to the
    /// console.
    pub fn error<T: Display + ?Sized>(&self, payload: &T, site: &CallSite) {
        let record = self.record(LogLevel::Error, payload, site);
        let exception = ExceptionRecord::from_record(&record, self.config.environment_tag());
        self.relay(|reporter| reporter.record_exception(&exception));
        self.console.write_block(&record.console_block());
    }

    fn record<T: Display + ?Sized>(&self, level: LogLevel, payload: &T, site: &CallSite) -> LogRecord {
        LogRecord::new(level, payload.to_string(), site, &self.config.root_marker)
    }

    fn relay<F>(&self, report: F)
    where
        F: FnOnce(&dyn ReportingSink) -> Result<(), ReportError>,
    {
        match panic::catch_unwind(AssertUnwindSafe(|| report(&*self.reporter))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::debug!(error = %e, "reporting sink failed, report dropped"),
            Err(_) => tracing::debug!("reporting sink panicked, report dropped"),
        }
    }
}

/// Log through [`LogFacade::info`] with the current call site.
///
/// ```
/// use std::sync::Arc;
/// use crumb_log::{log_info, FacadeConfig, LogFacade, NoopReporter};
///
/// let logger = LogFacade::new(FacadeConfig::default(), Arc::new(NoopReporter));
/// log_info!(logger, "cart loaded");
/// log_info!(logger, "{} items", 3);
/// ```
#[macro_export]
macro_rules! log_info {
    ($facade:expr, $fmt:literal, $($arg:tt)+) => {
        $facade.info(&::std::format_args!($fmt, $($arg)+), &$crate::call_site!())
    };
    ($facade:expr, $payload:expr $(,)?) => {
        $facade.info(&$payload, &$crate::call_site!())
    };
}

/// Log through [`LogFacade::network`] with the current call site.
///
/// Options default to [`NetworkOptions::default`]; pass others after a
/// `;` so they are never mistaken for format arguments.
///
/// ```
/// use std::sync::Arc;
/// use crumb_log::{log_network, FacadeConfig, LogFacade, NetworkOptions, NoopReporter};
///
/// let logger = LogFacade::new(FacadeConfig::default(), Arc::new(NoopReporter));
/// let path = "/cart";
/// log_network!(logger, "GET /cart 200");
/// log_network!(logger, "GET {} {}", path, 200);
/// log_network!(logger, "GET /cart 500"; NetworkOptions::escalated());
/// log_network!(logger, "GET {} {}", path, 500; NetworkOptions::printed());
/// ```
#[macro_export]
macro_rules! log_network {
    ($facade:expr, $payload:expr $(,)?) => {
        $facade.network(
            &$payload,
            &$crate::call_site!(),
            $crate::facade::NetworkOptions::default(),
        )
    };
    ($facade:expr, $payload:expr ; $options:expr $(,)?) => {
        $facade.network(&$payload, &$crate::call_site!(), $options)
    };
    ($facade:expr, $fmt:literal, $($arg:expr),+ ; $options:expr $(,)?) => {
        $facade.network(
            &::std::format_args!($fmt, $($arg),+),
            &$crate::call_site!(),
            $options,
        )
    };
    ($facade:expr, $fmt:literal, $($arg:expr),+ $(,)?) => {
        $facade.network(
            &::std::format_args!($fmt, $($arg),+),
            &$crate::call_site!(),
            $crate::facade::NetworkOptions::default(),
        )
    };
}

/// Log through [`LogFacade::error`] with the current call site.
#[macro_export]
macro_rules! log_error {
    ($facade:expr, $fmt:literal, $($arg:tt)+) => {
        $facade.error(&::std::format_args!($fmt, $($arg)+), &$crate::call_site!())
    };
    ($facade:expr, $payload:expr $(,)?) => {
        $facade.error(&$payload, &$crate::call_site!())
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::MemoryConsole;
    use crate::noop_sink::NoopReporter;

    fn facade(console: &Arc<MemoryConsole>) -> LogFacade {
        LogFacade::new(FacadeConfig::default(), Arc::new(NoopReporter)).with_console(console.clone())
    }

    #[test]
    fn macros_capture_this_file() {
        let console = Arc::new(MemoryConsole::new());
        let logger = facade(&console);

        log_info!(logger, "value={}", 5);
        log_error!(logger, String::from("bad"));

        let blocks = console.blocks();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].contains("src > facade.rs"), "{}", blocks[0]);
        assert!(blocks[0].contains("\nvalue=5\n"));
        assert!(blocks[0].contains("tests::macros_capture_this_file"));
        assert!(blocks[1].contains("\nbad\n"));
    }

    #[test]
    fn option_presets() {
        assert!(NetworkOptions::printed().print_to_console);
        assert!(!NetworkOptions::printed().report_as_error);
        assert!(NetworkOptions::escalated().report_as_error);
        assert_eq!(NetworkOptions::default(), NetworkOptions {
            print_to_console: false,
            report_as_error: false,
        });
    }
}
