//! Minimal log file with a plain line layout

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::LogError;

use super::{open_for_append, LogFile};

/// Log file that appends bare lines with no header
#[derive(Debug)]
pub struct BasicLogFile {
    path: PathBuf,
}

impl BasicLogFile {
    /// Create a handle for the given path; the file itself is created lazily
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LogFile for BasicLogFile {
    fn append(&self, line: &str) -> Result<(), LogError> {
        let mut file = open_for_append(&self.path)?;
        // One write_all per line so a concurrent reader never sees a partial line
        file.write_all(format!("{}\n", line).as_bytes())?;
        Ok(())
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
