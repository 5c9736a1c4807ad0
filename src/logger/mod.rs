//! Process-wide logger coordinating all log file writes
//!
//! The logger resolves "the log file for today" through a pluggable factory,
//! funnels every write through one serialized task so concurrent callers
//! never interleave lines, and purges files older than a day limit. Logging
//! calls are fire-and-forget: callers hand off a formatted line and return
//! without waiting for the file I/O.

mod purge;
mod writer;

pub use purge::PurgeOutcome;

use std::error::Error as StdError;
use std::sync::{Arc, OnceLock, RwLock};

use chrono::NaiveDate;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::clock::{Clock, SystemClock};
use crate::config::LogConfig;
use crate::entry::{LogEntry, Severity};
use crate::error::LogError;
use crate::logfile::{ExtendedLogFileFactory, LogFile, LogFileFactory};

use writer::{ActiveFileCell, WriterCommand};

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// Process-wide logger over date-partitioned log files
pub struct Logger {
    config: LogConfig,
    clock: Arc<dyn Clock>,
    factory: Arc<dyn LogFileFactory>,
    active: ActiveFileCell,
    tx: UnboundedSender<WriterCommand>,
    task: JoinHandle<()>,
}

impl Logger {
    /// Create a logger with the system clock and the default file backend
    ///
    /// Spawns the writer task, so this must run inside a tokio runtime.
    pub fn new(config: LogConfig) -> Self {
        Self::with_parts(
            config,
            Arc::new(SystemClock),
            Arc::new(ExtendedLogFileFactory),
        )
    }

    /// Create a logger with an explicit clock and file factory
    ///
    /// Tests use this to pin the date and to substitute file backends.
    pub fn with_parts(
        config: LogConfig,
        clock: Arc<dyn Clock>,
        factory: Arc<dyn LogFileFactory>,
    ) -> Self {
        let active: ActiveFileCell = Arc::new(RwLock::new(None));
        let (tx, task) = writer::spawn(
            config.log_dir.clone(),
            config.file_prefix.clone(),
            Arc::clone(&clock),
            Arc::clone(&factory),
            Arc::clone(&active),
        );

        Self {
            config,
            clock,
            factory,
            active,
            tx,
            task,
        }
    }

    /// Shared global instance, constructed lazily exactly once
    ///
    /// Built from the on-disk config (falling back to defaults). First access
    /// must happen inside a tokio runtime. Tests should construct their own
    /// instances with [`Logger::with_parts`] instead of sharing this one.
    pub fn global() -> &'static Logger {
        GLOBAL.get_or_init(|| Logger::new(LogConfig::load().unwrap_or_default()))
    }

    /// Configuration this logger was built with
    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Write a message to today's log file
    pub fn log_message(&self, message: impl Into<String>) {
        self.submit(Severity::Info, message.into());
    }

    /// Write an error to today's log file, rendered from its Display impl
    pub fn log_error(&self, error: &dyn StdError) {
        self.submit(Severity::Error, error.to_string());
    }

    /// Write a panic payload to today's log file
    ///
    /// Intended for panic-hook glue that wants crashes recorded before the
    /// process unwinds.
    pub fn log_panic(&self, payload: &str) {
        self.submit(Severity::Panic, payload.to_string());
    }

    fn submit(&self, severity: Severity, message: String) {
        let entry = LogEntry::new(self.clock.now(), severity, message);
        // Send only fails once the logger is shut down; writes are
        // fire-and-forget so that is deliberately ignored
        let _ = self.tx.send(WriterCommand::Write(entry.format_line()));
    }

    /// The log file the logger is currently writing to
    ///
    /// Returns the cached handle while the calendar day matches; after a
    /// rollover (or before the first write) it resolves a fresh handle for
    /// today. The cache itself is only mutated by the writer task.
    pub fn current_log_file(&self) -> Arc<dyn LogFile> {
        let today = self.clock.today();

        if let Ok(guard) = self.active.read() {
            if let Some(active) = guard.as_ref() {
                if active.date == today {
                    return Arc::clone(&active.file);
                }
            }
        }

        self.log_file_for_date(today)
    }

    /// The log file for the given date
    ///
    /// Pure resolution: the same date always maps to the same path. The
    /// underlying file may or may not exist.
    pub fn log_file_for_date(&self, date: NaiveDate) -> Arc<dyn LogFile> {
        let path = self
            .config
            .log_dir
            .join(purge::file_name_for_date(&self.config.file_prefix, date));
        self.factory.new_log_file(path)
    }

    /// Delete log files strictly older than `day_age_limit` days
    ///
    /// Runs on the writer task, so purge never interleaves with an in-flight
    /// write. A file exactly `day_age_limit` days old is kept. Individual
    /// deletion failures are recorded in the outcome and do not stop the
    /// remaining work.
    pub async fn purge_old_log_files(
        &self,
        day_age_limit: u64,
    ) -> Result<PurgeOutcome, LogError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(WriterCommand::Purge {
                day_age_limit,
                reply,
            })
            .map_err(|_| LogError::Shutdown)?;
        rx.await.map_err(|_| LogError::Shutdown)
    }

    /// Delete log files older than the configured retention period
    pub async fn purge_expired(&self) -> Result<PurgeOutcome, LogError> {
        self.purge_old_log_files(self.config.retention_days).await
    }

    /// Wait until every previously submitted write has reached the file
    pub async fn flush(&self) -> Result<(), LogError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(WriterCommand::Flush(reply))
            .map_err(|_| LogError::Shutdown)?;
        rx.await.map_err(|_| LogError::Shutdown)
    }

    /// Tear the logger down, waiting for the writer task to drain
    ///
    /// Pending writes are completed before this returns. Tests use this for
    /// deterministic teardown of per-test instances.
    pub async fn shutdown(self) {
        let Logger { tx, task, .. } = self;
        drop(tx);
        let _ = task.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use std::path::Path;
    use tempfile::TempDir;

    use crate::clock::ManualClock;

    fn test_config(dir: &Path) -> LogConfig {
        LogConfig {
            log_dir: dir.to_path_buf(),
            file_prefix: "logbook".to_string(),
            retention_days: 7,
        }
    }

    fn manual_logger(dir: &Path, y: i32, m: u32, d: u32) -> (Logger, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(
            Local.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap(),
        ));
        let logger = Logger::with_parts(
            test_config(dir),
            Arc::clone(&clock) as Arc<dyn Clock>,
            Arc::new(ExtendedLogFileFactory),
        );
        (logger, clock)
    }

    /// Entry lines of a log file, with directive lines stripped
    fn read_entries(path: &Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .unwrap_or_default()
            .lines()
            .filter(|line| !line.starts_with('#'))
            .map(|line| line.to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_messages_land_in_one_file_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let (logger, _clock) = manual_logger(temp_dir.path(), 2026, 3, 14);

        logger.log_message("first");
        logger.log_message("second");
        logger.log_message("third");
        logger.flush().await.unwrap();

        let file = logger.current_log_file();
        let entries = read_entries(file.path());
        assert_eq!(entries.len(), 3);
        assert!(entries[0].ends_with("first"));
        assert!(entries[1].ends_with("second"));
        assert!(entries[2].ends_with("third"));

        logger.shutdown().await;
    }

    #[tokio::test]
    async fn test_severity_tags_in_lines() {
        let temp_dir = TempDir::new().unwrap();
        let (logger, _clock) = manual_logger(temp_dir.path(), 2026, 3, 14);

        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        logger.log_message("plain");
        logger.log_error(&io_err);
        logger.log_panic("stack overflow");
        logger.flush().await.unwrap();

        let entries = read_entries(logger.current_log_file().path());
        assert!(entries[0].contains("[INFO]"));
        assert!(entries[1].contains("[ERROR]"));
        assert!(entries[1].ends_with("boom"));
        assert!(entries[2].contains("[PANIC]"));

        logger.shutdown().await;
    }

    #[tokio::test]
    async fn test_log_file_for_date_is_pure() {
        let temp_dir = TempDir::new().unwrap();
        let (logger, _clock) = manual_logger(temp_dir.path(), 2026, 3, 14);

        let date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        let a = logger.log_file_for_date(date);
        let b = logger.log_file_for_date(date);
        assert_eq!(a.path(), b.path());
        assert!(!a.exists());

        logger.shutdown().await;
    }

    #[tokio::test]
    async fn test_current_log_file_stable_within_a_day() {
        let temp_dir = TempDir::new().unwrap();
        let (logger, _clock) = manual_logger(temp_dir.path(), 2026, 3, 14);

        let before_write = logger.current_log_file();
        logger.log_message("hello");
        logger.flush().await.unwrap();
        let after_write = logger.current_log_file();

        assert_eq!(before_write.path(), after_write.path());
        assert!(after_write
            .path()
            .to_string_lossy()
            .ends_with("logbook-2026-03-14.log"));

        logger.shutdown().await;
    }

    #[tokio::test]
    async fn test_rollover_at_midnight_splits_files() {
        let temp_dir = TempDir::new().unwrap();
        let clock = Arc::new(ManualClock::new(
            Local.with_ymd_and_hms(2026, 3, 14, 23, 59, 59).unwrap(),
        ));
        let logger = Logger::with_parts(
            test_config(temp_dir.path()),
            Arc::clone(&clock) as Arc<dyn Clock>,
            Arc::new(ExtendedLogFileFactory),
        );

        logger.log_message("before midnight");
        logger.flush().await.unwrap();

        clock.set(Local.with_ymd_and_hms(2026, 3, 15, 0, 0, 1).unwrap());
        logger.log_message("after midnight");
        logger.flush().await.unwrap();

        let day_one = read_entries(&temp_dir.path().join("logbook-2026-03-14.log"));
        let day_two = read_entries(&temp_dir.path().join("logbook-2026-03-15.log"));
        assert_eq!(day_one.len(), 1);
        assert!(day_one[0].ends_with("before midnight"));
        assert_eq!(day_two.len(), 1);
        assert!(day_two[0].ends_with("after midnight"));

        logger.shutdown().await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_concurrent_callers_never_interleave_lines() {
        let temp_dir = TempDir::new().unwrap();
        let (logger, _clock) = manual_logger(temp_dir.path(), 2026, 3, 14);
        let logger = Arc::new(logger);

        let tasks = 8;
        let per_task = 50;
        let mut handles = Vec::new();
        for t in 0..tasks {
            let logger = Arc::clone(&logger);
            handles.push(tokio::spawn(async move {
                for i in 0..per_task {
                    logger.log_message(format!("task {} line {:03}", t, i));
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        logger.flush().await.unwrap();

        let entries = read_entries(logger.current_log_file().path());
        assert_eq!(entries.len(), tasks * per_task);

        // Every line is intact and, per submitting task, in submission order
        for t in 0..tasks {
            let suffixes: Vec<&String> = entries
                .iter()
                .filter(|line| line.contains(&format!("task {} line", t)))
                .collect();
            assert_eq!(suffixes.len(), per_task);
            for (i, line) in suffixes.iter().enumerate() {
                assert!(line.ends_with(&format!("task {} line {:03}", t, i)));
            }
        }

        let logger = Arc::try_unwrap(logger).unwrap_or_else(|_| panic!("logger still shared"));
        logger.shutdown().await;
    }

    #[tokio::test]
    async fn test_purge_scenario_across_rollover() {
        let temp_dir = TempDir::new().unwrap();
        let clock = Arc::new(ManualClock::new(
            Local.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap(),
        ));
        let logger = Logger::with_parts(
            test_config(temp_dir.path()),
            Arc::clone(&clock) as Arc<dyn Clock>,
            Arc::new(ExtendedLogFileFactory),
        );

        logger.log_message("day one, first");
        logger.log_message("day one, second");
        logger.log_message("day one, third");
        logger.flush().await.unwrap();

        clock.set(Local.with_ymd_and_hms(2026, 3, 15, 8, 0, 0).unwrap());
        logger.log_message("day two, first");
        logger.log_message("day two, second");
        logger.flush().await.unwrap();

        let outcome = logger.purge_old_log_files(0).await.unwrap();
        assert_eq!(outcome, PurgeOutcome { deleted: 1, failed: 0 });

        assert!(!temp_dir.path().join("logbook-2026-03-14.log").exists());
        let kept = read_entries(&temp_dir.path().join("logbook-2026-03-15.log"));
        assert_eq!(kept.len(), 2);
        assert!(kept[0].ends_with("day two, first"));
        assert!(kept[1].ends_with("day two, second"));

        logger.shutdown().await;
    }

    #[tokio::test]
    async fn test_purge_expired_uses_configured_retention() {
        let temp_dir = TempDir::new().unwrap();
        let (logger, _clock) = manual_logger(temp_dir.path(), 2026, 3, 14);

        std::fs::write(temp_dir.path().join("logbook-2026-03-07.log"), b"old\n").unwrap();
        std::fs::write(temp_dir.path().join("logbook-2026-03-06.log"), b"older\n").unwrap();

        let outcome = logger.purge_expired().await.unwrap();
        assert_eq!(outcome.deleted, 1);
        assert!(temp_dir.path().join("logbook-2026-03-07.log").exists());
        assert!(!temp_dir.path().join("logbook-2026-03-06.log").exists());

        logger.shutdown().await;
    }

    #[test]
    fn test_writes_before_shutdown_are_drained() {
        tokio_test::block_on(async {
            let temp_dir = TempDir::new().unwrap();
            let (logger, _clock) = manual_logger(temp_dir.path(), 2026, 3, 14);

            let path = logger.current_log_file().path().to_path_buf();
            for i in 0..20 {
                logger.log_message(format!("line {}", i));
            }
            logger.shutdown().await;

            let entries = read_entries(&path);
            assert_eq!(entries.len(), 20);
        });
    }
}
