//! Error types for the logging subsystem
//!
//! Nothing here is ever fatal to the process: the fire-and-forget write path
//! discards these errors, and purge records per-file failures and moves on.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by log file operations
#[derive(Debug, Error)]
pub enum LogError {
    /// The log file or its parent directory could not be created
    #[error("failed to create log file at {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An append to an existing log file failed (disk full, permissions, ...)
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The logger's writer task is no longer running
    #[error("logger has been shut down")]
    Shutdown,
}
