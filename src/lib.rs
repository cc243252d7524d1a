pub mod breadcrumb;
pub mod payload;
pub mod record;
pub mod site;

pub mod console;
pub mod sink;
pub mod noop_sink;
pub mod tracing_sink;

#[cfg(feature = "http")]
pub mod http;

pub mod env;
pub mod backend;
pub mod facade;
pub mod lifecycle;
pub mod layer;
pub mod init;

pub use console::{ConsoleSink, MemoryConsole, StdoutConsole};
pub use env::{Environment, FacadeConfig};
pub use facade::{LogFacade, NetworkOptions};
pub use lifecycle::{ViewGuard, ViewLogger};
pub use noop_sink::NoopReporter;
pub use record::{ExceptionRecord, LogLevel, LogRecord};
pub use site::CallSite;
pub use sink::{AsyncReporter, ReportError, ReportingSink, Spawned};
pub use tracing_sink::TracingReporter;
