//! Ledger of bugs that already received a reminder.
//!
//! Plain text, one bug id per line, append-only. Every successful reminder
//! is appended immediately so an interrupted run can be resumed without
//! reminding anyone twice. Removing a line makes that bug eligible again.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::ReminderError;
use crate::ports::{BugId, FileSystem};

/// Append-only exclusion list backed by a file.
///
/// All I/O goes through the `FileSystem` port.
pub struct Ledger<'a> {
    fs: &'a dyn FileSystem,
    path: PathBuf,
}

impl<'a> Ledger<'a> {
    /// Creates a ledger stored at `path`.
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem, path: &Path) -> Self {
        Self { fs, path: path.to_path_buf() }
    }

    /// Location of the ledger file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if the ledger file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.fs.exists(&self.path)
    }

    /// Reads every recorded bug id. A missing file is an empty ledger.
    ///
    /// # Errors
    ///
    /// Returns [`ReminderError::LedgerRead`] if the file cannot be read and
    /// [`ReminderError::LedgerParse`] on the first line that is not an id.
    pub fn load(&self) -> Result<HashSet<BugId>, ReminderError> {
        if !self.exists() {
            return Ok(HashSet::new());
        }
        let contents = self
            .fs
            .read_to_string(&self.path)
            .map_err(|source| ReminderError::LedgerRead { path: self.path.clone(), source })?;

        let mut ids = HashSet::new();
        for (index, line) in contents.lines().enumerate() {
            let id = line.parse::<BugId>().map_err(|_| ReminderError::LedgerParse {
                path: self.path.clone(),
                line: index + 1,
                content: line.to_string(),
            })?;
            ids.insert(id);
        }
        Ok(ids)
    }

    /// Appends `id` as a new line, creating the file if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ReminderError::LedgerWrite`] if the append fails.
    pub fn record(&self, id: BugId) -> Result<(), ReminderError> {
        self.fs.append(&self.path, &format!("{id}\n")).map_err(|source| {
            ReminderError::LedgerWrite { path: self.path.clone(), bug: id.as_u64(), source }
        })
    }
}
