//! Log file abstractions
//!
//! A [`LogFile`] wraps one append-only destination on disk. Files are created
//! lazily on first append. Do not write to a log file directly from
//! application code; route writes through [`crate::logger::Logger`] so they
//! are serialized and never interleave.

mod basic;
mod extended;
mod factory;

pub use basic::BasicLogFile;
pub use extended::ExtendedLogFile;
pub use factory::{ExtendedLogFileFactory, LogFileFactory};

use std::fs::{self, File, OpenOptions};
use std::path::Path;

use crate::error::LogError;

/// Capability over one append-only log destination
pub trait LogFile: Send + Sync {
    /// Append one formatted line to the file
    ///
    /// Creates the file and any missing parent directories on first append.
    /// Callers that treat logging as fire-and-forget discard the error
    /// explicitly; callers that care (purge accounting, tests) inspect it.
    fn append(&self, line: &str) -> Result<(), LogError>;

    /// Whether an actual file exists underneath
    ///
    /// Pure query; never creates the file. False until the first successful
    /// append.
    fn exists(&self) -> bool;

    /// Path of the underlying file
    fn path(&self) -> &Path;
}

/// Open a log file for appending, creating it and its parents if needed
fn open_for_append(path: &Path) -> Result<File, LogError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| LogError::Create {
            path: path.to_path_buf(),
            source,
        })?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LogError::Create {
            path: path.to_path_buf(),
            source,
        })
}
