use serde::Serialize;
use std::fmt;

use crate::breadcrumb::breadcrumb;
use crate::site::CallSite;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Network,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Network => "network",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single facade call, composed at invocation and consumed right away
/// by formatting and sink dispatch.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
    /// Breadcrumb of the caller's source file.
    pub source_file: String,
    pub function: String,
    pub line: u32,
    /// Only populated for [`LogLevel::Info`].
    pub column: Option<u32>,
}

impl LogRecord {
    pub fn new(level: LogLevel, message: String, site: &CallSite, root_marker: &str) -> Self {
        LogRecord {
            level,
            message,
            source_file: breadcrumb(&site.file, root_marker),
            function: site.function.to_string(),
            line: site.line,
            column: match level {
                LogLevel::Info => Some(site.column),
                _ => None,
            },
        }
    }

    /// Multi-line block written to the console sink.
    pub fn console_block(&self) -> String {
        match self.level {
            LogLevel::Info => format!(
                "\n==> ✍️ Log called from file: {}\n\
                 ==> 📝 Function name: {}\n\
                 ==> 📄 Line number: {}\n\
                 ==> 📄 column number: {}\n\
                 ===================== 📬 Begin 📬 =========================\n\
                 {}\n\
                 ====================== 📪 End 📪 ==========================\n",
                self.source_file,
                self.function,
                self.line,
                self.column.unwrap_or_default(),
                self.message,
            ),
            LogLevel::Network => format!(
                "\n===================== 📟 ⏳ 📡 =========================\n\
                 {}\n\
                 ======================= 🚀 ⌛️ 📡 =========================\n",
                self.message,
            ),
            LogLevel::Error => format!(
                "\n==> ‼️ Error log coming from file: {}\n\
                 ==> ‼️ Function name: {}\n\
                 ==> ‼️ Line number: {}\n\
                 ===================== ❌ Begin ❌ =========================\n\
                 {}\n\
                 ====================== ❌ End ❌ ==========================\n",
                self.source_file, self.function, self.line, self.message,
            ),
        }
    }

    /// One-line text for the reporting sink's log channel.
    pub fn summary(&self) -> String {
        let (origin, key) = match self.level {
            LogLevel::Info => ("logger", "logger"),
            LogLevel::Network => ("network", "log"),
            LogLevel::Error => ("error", "error"),
        };
        format!("log from {} {} {}={}", origin, self.location(), key, self.message)
    }

    /// `file=<crumb> Function=<fn> Line=<n>`, shared by summaries and
    /// exception reasons.
    pub fn location(&self) -> String {
        format!(
            "file={} Function={} Line={}",
            self.source_file, self.function, self.line
        )
    }
}

/// Structured record submitted to the reporting sink's exception channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExceptionRecord {
    pub name: String,
    pub reason: String,
}

impl ExceptionRecord {
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ExceptionRecord {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Exception for an error-level record, named after the running
    /// environment.
    pub fn from_record(record: &LogRecord, environment_tag: &str) -> Self {
        ExceptionRecord {
            name: exception_name(environment_tag),
            reason: format!("{} error={}", record.location(), record.message),
        }
    }
}

pub fn exception_name(environment_tag: &str) -> String {
    format!("log error at {}", environment_tag)
}
