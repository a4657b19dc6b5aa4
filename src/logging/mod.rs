//! Logging - Audit Trail and Diagnostic Tracing
//!
//! Two separate channels:
//! - `AuditLogger`: human-readable trail of every API interaction,
//!   appended to a file and echoed to the console. Constructed once per
//!   invocation and passed down; tests inject a `MemorySink`.
//! - `init_tracing`: `tracing` subscriber for internal diagnostics
//!   (`#[instrument]` spans, HTTP debug events), filtered by `RUST_LOG`.
//!
//! Audit line format: `<YYYY-MM-DD HH:MM:SS,mmm> - <LEVEL> - <message>`.

pub mod sinks;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Local};
use tracing::warn;

use crate::config::LoggingConfig;

pub use sinks::{ConsoleSink, FileSink, LogSink, MemorySink};

/// Severity of an audit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => f.write_str("INFO"),
            Self::Error => f.write_str("ERROR"),
        }
    }
}

/// One audit event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

impl LogRecord {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            level,
            message: message.into(),
        }
    }

    /// Render as a single log line (no trailing newline).
    pub fn format_line(&self) -> String {
        format!(
            "{} - {} - {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S,%3f"),
            self.level,
            self.message
        )
    }
}

/// Append-and-echo audit logger.
///
/// Cloning shares the same sinks.
#[derive(Clone)]
pub struct AuditLogger {
    sinks: Vec<Arc<dyn LogSink>>,
}

impl fmt::Debug for AuditLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuditLogger")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl AuditLogger {
    /// Open the log file (creating its directory) and optionally echo to
    /// the console.
    ///
    /// Calling this again for the same path appends to the existing file.
    ///
    /// # Errors
    /// Returns an error if the log directory or file cannot be opened.
    pub fn init(path: impl AsRef<Path>, echo: bool) -> std::io::Result<Self> {
        let mut sinks: Vec<Arc<dyn LogSink>> = vec![Arc::new(FileSink::open(path)?)];
        if echo {
            sinks.push(Arc::new(ConsoleSink));
        }
        Ok(Self { sinks })
    }

    /// Build from `[logging]` config.
    ///
    /// # Errors
    /// See [`AuditLogger::init`].
    pub fn from_config(config: &LoggingConfig) -> std::io::Result<Self> {
        Self::init(&config.file, config.console)
    }

    /// Logger over explicit sinks.
    pub fn with_sinks(sinks: Vec<Arc<dyn LogSink>>) -> Self {
        Self { sinks }
    }

    /// Logger that discards everything.
    pub fn disabled() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn info(&self, message: impl Into<String>) {
        self.emit(LogRecord::new(LogLevel::Info, message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.emit(LogRecord::new(LogLevel::Error, message));
    }

    /// `API Request: <METHOD> <endpoint> | Params: <json|None>`.
    pub fn log_request(&self, method: &str, endpoint: &str, params: Option<&str>) {
        self.info(format!(
            "API Request: {method} {endpoint} | Params: {}",
            params.unwrap_or("None")
        ));
    }

    /// `API Response: <json>`.
    pub fn log_response(&self, response: &serde_json::Value) {
        self.info(format!("API Response: {response}"));
    }

    /// `Error: <message>`.
    pub fn log_error(&self, error: impl fmt::Display) {
        self.error(format!("Error: {error}"));
    }

    fn emit(&self, record: LogRecord) {
        for sink in &self.sinks {
            if let Err(e) = sink.emit(&record) {
                warn!(error = %e, "Audit sink write failed");
            }
        }
    }
}

/// Install the diagnostic `tracing` subscriber on stderr.
///
/// `RUST_LOG` wins over `config.level`. A second call is a no-op.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    // Err only means a subscriber is already installed.
    let _ = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
