//! Filename date codec and purge of expired log files
//!
//! A log file's age is the calendar-day difference between "today" and the
//! date encoded in its filename, never a timestamp delta, so the retention
//! boundary stays deterministic around midnight.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::NaiveDate;
use tracing::warn;

const FILE_DATE_FORMAT: &str = "%Y-%m-%d";
const FILE_EXTENSION: &str = ".log";

/// Outcome of one purge pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgeOutcome {
    /// Files removed (or already gone when we tried)
    pub deleted: usize,
    /// Files that could not be removed
    pub failed: usize,
}

/// Build the filename for a given date, e.g. `logbook-2026-03-14.log`
pub fn file_name_for_date(prefix: &str, date: NaiveDate) -> String {
    format!(
        "{}-{}{}",
        prefix,
        date.format(FILE_DATE_FORMAT),
        FILE_EXTENSION
    )
}

/// Recover the date encoded in a log filename
///
/// Returns None for filenames that don't match the prefix/date/extension
/// shape; purge uses this to skip foreign files in the log directory.
pub fn date_from_file_name(prefix: &str, name: &str) -> Option<NaiveDate> {
    let rest = name.strip_prefix(prefix)?.strip_prefix('-')?;
    let stem = rest.strip_suffix(FILE_EXTENSION)?;
    NaiveDate::parse_from_str(stem, FILE_DATE_FORMAT).ok()
}

/// Delete log files strictly older than `day_age_limit` days
///
/// A file exactly `day_age_limit` days old is kept. Files are handled
/// independently: one failed deletion is recorded and the rest are still
/// processed. A file that is already gone counts as deleted.
pub fn purge_older_than(
    dir: &Path,
    prefix: &str,
    today: NaiveDate,
    day_age_limit: u64,
) -> PurgeOutcome {
    let mut outcome = PurgeOutcome::default();
    let limit = i64::try_from(day_age_limit).unwrap_or(i64::MAX);

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return outcome,
        Err(err) => {
            warn!("Failed to read log directory {}: {}", dir.display(), err);
            return outcome;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(date) = date_from_file_name(prefix, name) else {
            continue;
        };

        let age_days = (today - date).num_days();
        if age_days <= limit {
            continue;
        }

        match fs::remove_file(&path) {
            Ok(()) => outcome.deleted += 1,
            Err(err) if err.kind() == ErrorKind::NotFound => outcome.deleted += 1,
            Err(err) => {
                warn!("Failed to delete old log file {}: {}", path.display(), err);
                outcome.failed += 1;
            }
        }
    }

    outcome
}
