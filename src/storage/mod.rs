//! Storage layer: log directories, the user-list snapshot, and the bot
//! database.
//!
//! One `LogStore` type, parameterized by directory, replaces the per-source
//! storage duplication: the server instantiates it once for the bot's log
//! directory and once for the service's own.

pub mod db;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tokio::fs::File;

use crate::resolver;

/// Fixed file name of the user-list snapshot.
pub const USER_LIST_FILE: &str = "ListUsers.txt";

/// Read-only view over a directory of `{YYYY-MM-DD}.log` files.
#[derive(Debug, Clone)]
pub struct LogStore {
    dir: PathBuf,
    interval_days: i64,
}

impl LogStore {
    pub fn new(dir: impl Into<PathBuf>, interval_days: i64) -> Self {
        Self {
            dir: dir.into(),
            interval_days,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Open the log file for `date` (today when absent), or `None` if it
    /// does not exist.
    pub async fn get_by_date(&self, date: Option<NaiveDate>) -> std::io::Result<Option<File>> {
        resolver::resolve_file_for_date(&self.dir, date).await
    }

    /// Embedded dates of every entry, in enumeration order.
    pub async fn list_available(&self) -> std::io::Result<Vec<String>> {
        resolver::list_all_files(&self.dir).await
    }

    /// Embedded dates falling inside the window inferred from the given
    /// bounds, sorted ascending.
    pub async fn list_available_in_window(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> std::io::Result<Vec<String>> {
        resolver::list_files_in_window(&self.dir, from, to, self.interval_days).await
    }
}

/// Read-only view over the directory holding the user-list snapshot.
#[derive(Debug, Clone)]
pub struct UserListStore {
    dir: PathBuf,
}

impl UserListStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Open `ListUsers.txt`, or `None` if it does not exist.
    pub async fn open_snapshot(&self) -> std::io::Result<Option<File>> {
        let path = self.dir.join(USER_LIST_FILE);
        match File::open(&path).await {
            Ok(file) => {
                tracing::debug!(path = %path.display(), "User list found");
                Ok(Some(file))
            }
            Err(e) if resolver::path_absent(&e) => {
                tracing::debug!(path = %path.display(), "User list not found");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
