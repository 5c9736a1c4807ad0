//! Log entry model and line formatting
//!
//! Entries are formatted into a single line at write time and never retained
//! afterwards.

use chrono::{DateTime, Local};

/// Severity of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
    Panic,
}

impl Severity {
    /// Get the display tag for this severity
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Error => "ERROR",
            Severity::Panic => "PANIC",
        }
    }
}

/// A single log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// When the entry was submitted
    pub timestamp: DateTime<Local>,
    /// Severity tag written into the line
    pub severity: Severity,
    /// Log message
    pub message: String,
}

impl LogEntry {
    /// Create a new log entry
    pub fn new(
        timestamp: DateTime<Local>,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            severity,
            message: message.into(),
        }
    }

    /// Format this entry as one log line, without the trailing newline
    ///
    /// Embedded newlines are escaped so an entry always occupies exactly one
    /// line in the file.
    pub fn format_line(&self) -> String {
        format!(
            "{} [{}] {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
            self.severity.as_str(),
            self.message.replace('\n', "\\n"),
        )
    }
}
