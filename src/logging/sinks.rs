//! Audit Log Sinks - File, Console and In-Memory Targets
//!
//! Every sink receives the same fully formatted record and must have
//! written it before returning. The file sink opens in append mode so
//! re-opening the same path never loses earlier lines.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use super::LogRecord;

/// Destination for audit records.
pub trait LogSink: Send + Sync {
    /// Write one record; returns once the line is flushed.
    fn emit(&self, record: &LogRecord) -> io::Result<()>;
}

/// Append-only log file.
pub struct FileSink {
    file: Mutex<File>,
}

impl FileSink {
    /// Open `path` for appending, creating parent directories first.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file
    /// cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl LogSink for FileSink {
    fn emit(&self, record: &LogRecord) -> io::Result<()> {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(file, "{}", record.format_line())?;
        file.flush()
    }
}

/// Echo to stderr, keeping stdout for command results.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn emit(&self, record: &LogRecord) -> io::Result<()> {
        let mut stderr = io::stderr().lock();
        writeln!(stderr, "{}", record.format_line())?;
        stderr.flush()
    }
}

/// Captures records for assertions.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Messages only, in emission order.
    pub fn messages(&self) -> Vec<String> {
        self.records().into_iter().map(|r| r.message).collect()
    }
}

impl LogSink for MemorySink {
    fn emit(&self, record: &LogRecord) -> io::Result<()> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }
}
