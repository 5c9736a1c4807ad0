//! Serialized writer task
//!
//! Every file write funnels through one task draining a channel in FIFO
//! order, so appends to a log file never race and purge never interleaves
//! with a write to a file it may delete. Callers hand off a formatted line
//! and return immediately; only this task touches the filesystem.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use chrono::NaiveDate;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::error;

use crate::clock::Clock;
use crate::logfile::{LogFile, LogFileFactory};

use super::purge::{self, PurgeOutcome};

/// Commands handled by the writer task, in submission order
pub(super) enum WriterCommand {
    /// Append one formatted line to the current day's file
    Write(String),
    /// Delete files older than the limit, then report the outcome
    Purge {
        day_age_limit: u64,
        reply: oneshot::Sender<PurgeOutcome>,
    },
    /// Acknowledge once every previously submitted command has completed
    Flush(oneshot::Sender<()>),
}

/// Snapshot of the file currently being written
pub(super) struct ActiveFile {
    pub date: NaiveDate,
    pub file: Arc<dyn LogFile>,
}

/// Shared cell read by `Logger::current_log_file`, written only by the task
pub(super) type ActiveFileCell = Arc<RwLock<Option<ActiveFile>>>;

pub(super) fn spawn(
    log_dir: PathBuf,
    file_prefix: String,
    clock: Arc<dyn Clock>,
    factory: Arc<dyn LogFileFactory>,
    active: ActiveFileCell,
) -> (mpsc::UnboundedSender<WriterCommand>, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let handle = tokio::spawn(async move {
        let mut writer = Writer {
            log_dir,
            file_prefix,
            clock,
            factory,
            active,
        };
        while let Some(command) = rx.recv().await {
            writer.handle(command);
        }
    });

    (tx, handle)
}

struct Writer {
    log_dir: PathBuf,
    file_prefix: String,
    clock: Arc<dyn Clock>,
    factory: Arc<dyn LogFileFactory>,
    active: ActiveFileCell,
}

impl Writer {
    fn handle(&mut self, command: WriterCommand) {
        match command {
            WriterCommand::Write(line) => self.write_line(&line),
            WriterCommand::Purge {
                day_age_limit,
                reply,
            } => {
                let outcome = purge::purge_older_than(
                    &self.log_dir,
                    &self.file_prefix,
                    self.clock.today(),
                    day_age_limit,
                );
                let _ = reply.send(outcome);
            }
            WriterCommand::Flush(reply) => {
                // FIFO drain means reaching this command implies all earlier
                // writes have completed
                let _ = reply.send(());
            }
        }
    }

    /// Append one line to the file for the current date
    ///
    /// Failures are swallowed here: logging is best-effort and must never
    /// take down the caller's feature.
    fn write_line(&mut self, line: &str) {
        let file = self.file_for_today();
        if let Err(err) = file.append(line) {
            error!("Failed to append to {}: {}", file.path().display(), err);
        }
    }

    /// Resolve the active file, rolling over if the calendar day changed
    ///
    /// Checked before every write so a long-running process starts a new
    /// file at midnight.
    fn file_for_today(&mut self) -> Arc<dyn LogFile> {
        let today = self.clock.today();

        if let Ok(guard) = self.active.read() {
            if let Some(active) = guard.as_ref() {
                if active.date == today {
                    return Arc::clone(&active.file);
                }
            }
        }

        let path = self
            .log_dir
            .join(purge::file_name_for_date(&self.file_prefix, today));
        let file = self.factory.new_log_file(path);

        if let Ok(mut guard) = self.active.write() {
            *guard = Some(ActiveFile {
                date: today,
                file: Arc::clone(&file),
            });
        }

        file
    }
}
