//! Date-windowed log file resolution.
//!
//! Log files are named `{YYYY-MM-DD}.log` directly under a directory. This
//! module resolves a single file for an exact date, lists the embedded dates
//! of every entry, or lists the entries whose embedded date falls inside an
//! inclusive window. A missing file or directory is a normal outcome, not an
//! error; only genuine I/O faults (permissions etc.) propagate.
//!
//! Every call re-lists the directory; there is no state between calls, so
//! concurrent resolutions against the same directory are independent.

use std::io::ErrorKind;
use std::path::Path;
use std::sync::OnceLock;

use chrono::{Duration, Local, NaiveDate};
use regex::Regex;
use tokio::fs::{self, File};

/// Fallback window width in days when a range bound is not supplied.
pub const DEFAULT_INTERVAL_DAYS: i64 = 21;

/// Date format embedded in log file names.
const DATE_FORMAT: &str = "%Y-%m-%d";

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d{4}-\d{2}-\d{2}").expect("valid date pattern"))
}

/// Whether an I/O error means the looked-up path does not exist as a
/// directory entry. Covers both a missing component and a path that runs
/// through a regular file (ENOTDIR); both are the benign "absent" outcome.
pub(crate) fn path_absent(e: &std::io::Error) -> bool {
    matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory)
}

/// An inclusive calendar-date range used to filter directory entries.
///
/// `from <= to` is not enforced; an inverted window matches nothing. The HTTP
/// layer rejects explicitly inverted ranges before building a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    /// Build a window from partially-specified bounds.
    ///
    /// A missing bound is synthesized `interval_days` away from the given one;
    /// with neither bound given the window ends at `today`.
    pub fn infer(
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        interval_days: i64,
        today: NaiveDate,
    ) -> Self {
        let interval = Duration::days(interval_days);
        match (from, to) {
            (None, None) => Self {
                from: today - interval,
                to: today,
            },
            (None, Some(to)) => Self {
                from: to - interval,
                to,
            },
            (Some(from), None) => Self {
                from,
                to: from + interval,
            },
            (Some(from), Some(to)) => Self { from, to },
        }
    }

    /// Whether `date` falls inside the window, both ends inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// Extract the first embedded `YYYY-MM-DD` substring from a file name.
///
/// Returns an empty string when the name carries no date.
fn embedded_date(file_name: &str) -> String {
    date_pattern()
        .find(file_name)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Open the log file for `date` under `dir`, defaulting to today.
///
/// Returns `Ok(None)` when the file (or the directory) does not exist. The
/// caller owns the returned handle and is responsible for closing it, usually
/// by streaming it out as a response body.
pub async fn resolve_file_for_date(
    dir: &Path,
    date: Option<NaiveDate>,
) -> std::io::Result<Option<File>> {
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let path = dir.join(format!("{}.log", date.format(DATE_FORMAT)));

    match File::open(&path).await {
        Ok(file) => {
            tracing::debug!(path = %path.display(), "Log file found");
            Ok(Some(file))
        }
        Err(e) if path_absent(&e) => {
            tracing::debug!(path = %path.display(), "Log file not found");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// List the embedded date of every entry under `dir`, in enumeration order.
///
/// Entries without an embedded date contribute an empty string. A missing
/// directory yields an empty list.
pub async fn list_all_files(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if path_absent(&e) => {
            tracing::debug!(dir = %dir.display(), "Log directory not found");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };

    let mut dates = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        dates.push(embedded_date(&name));
    }
    Ok(dates)
}

/// List the embedded dates under `dir` that fall inside the window inferred
/// from `from`/`to`, sorted by date ascending.
///
/// Entries whose embedded date is absent or unparseable are silently dropped.
/// A missing directory yields an empty list.
pub async fn list_files_in_window(
    dir: &Path,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    interval_days: i64,
) -> std::io::Result<Vec<String>> {
    let window = DateWindow::infer(from, to, interval_days, Local::now().date_naive());

    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if path_absent(&e) => {
            tracing::debug!(dir = %dir.display(), "Log directory not found");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };

    let mut matched: Vec<(NaiveDate, String)> = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        let extracted = embedded_date(&name);
        if let Ok(date) = NaiveDate::parse_from_str(&extracted, DATE_FORMAT) {
            if window.contains(date) {
                matched.push((date, extracted));
            }
        }
    }

    matched.sort_by_key(|(date, _)| *date);
    Ok(matched.into_iter().map(|(_, name)| name).collect())
}
