//! Log file construction capability

use std::path::PathBuf;
use std::sync::Arc;

use super::{ExtendedLogFile, LogFile};

/// Builds [`LogFile`] handles for the logger
///
/// The logger only ever sees the abstraction, so substituting a different
/// factory at construction swaps the concrete file backend (e.g. an
/// in-memory fake in tests) without touching the logger itself.
pub trait LogFileFactory: Send + Sync {
    /// Create a handle for the given path
    ///
    /// The underlying file may or may not exist; it is created lazily on
    /// first append.
    fn new_log_file(&self, path: PathBuf) -> Arc<dyn LogFile>;
}

/// Default factory producing [`ExtendedLogFile`] handles
#[derive(Debug, Default)]
pub struct ExtendedLogFileFactory;

impl LogFileFactory for ExtendedLogFileFactory {
    fn new_log_file(&self, path: PathBuf) -> Arc<dyn LogFile> {
        Arc::new(ExtendedLogFile::new(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_factory_handle_is_lazy() {
        let temp_dir = TempDir::new().unwrap();
        let factory = ExtendedLogFileFactory;

        let log = factory.new_log_file(temp_dir.path().join("app.log"));
        assert!(!log.exists());
    }

    #[test]
    fn test_factory_handles_share_path_identity() {
        let factory = ExtendedLogFileFactory;
        let a = factory.new_log_file(PathBuf::from("/tmp/logs/app.log"));
        let b = factory.new_log_file(PathBuf::from("/tmp/logs/app.log"));
        assert_eq!(a.path(), b.path());
    }
}
