//! Log file using an extended-log-format-like layout
//!
//! On first append the file is created with W3C-style directive lines, then
//! each entry occupies exactly one line. The write counter tracks successful
//! appends for the lifetime of the in-memory handle; it is not persisted.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::LogError;

use super::{open_for_append, LogFile};

/// Directive lines written once, when the file is first created
const DIRECTIVES: &str = "#Version: 1.0\n#Fields: date time x-severity x-message\n";

/// Log file with a directive header and a per-handle write counter
#[derive(Debug)]
pub struct ExtendedLogFile {
    path: PathBuf,
    write_count: AtomicU64,
}

impl ExtendedLogFile {
    /// Create a handle for the given path; the file itself is created lazily
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_count: AtomicU64::new(0),
        }
    }

    /// Number of successful appends through this handle
    ///
    /// Failed appends are not counted. Resets when the handle is dropped;
    /// the counter is never read back from disk.
    pub fn write_count(&self) -> u64 {
        self.write_count.load(Ordering::Relaxed)
    }
}

impl LogFile for ExtendedLogFile {
    fn append(&self, line: &str) -> Result<(), LogError> {
        let fresh = !self.path.is_file();
        let mut file = open_for_append(&self.path)?;

        let mut buf = String::with_capacity(line.len() + 1);
        if fresh {
            buf.push_str(DIRECTIVES);
        }
        buf.push_str(line);
        buf.push('\n');

        file.write_all(buf.as_bytes())?;
        self.write_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
