//! In-memory adapters for exercising the workflow without disk or network.

use std::collections::{HashMap, HashSet};
use std::future::ready;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::PortError;
use crate::ports::{Bug, BugId, BugQuery, BugTracker, BugUpdate, FileSystem, TrackerFuture};

/// Filesystem held in a map of path to contents.
///
/// Clones share the same files, so a test can keep a handle after boxing
/// one into a [`crate::context::ServiceContext`].
#[derive(Clone, Default)]
pub struct MemoryFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
    fail_appends: Arc<AtomicBool>,
}

impl MemoryFileSystem {
    /// Creates an empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a filesystem holding a single file.
    #[must_use]
    pub fn with_file(path: impl Into<PathBuf>, contents: &str) -> Self {
        let fs = Self::new();
        fs.files.lock().expect("files lock poisoned").insert(path.into(), contents.to_string());
        fs
    }

    /// Current contents of `path`, if it exists.
    #[must_use]
    pub fn contents(&self, path: &Path) -> Option<String> {
        self.files.lock().expect("files lock poisoned").get(path).cloned()
    }

    /// Makes every later `append` fail.
    pub fn fail_appends(&self) {
        self.fail_appends.store(true, Ordering::SeqCst);
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.contents(path).ok_or_else(|| format!("File not found: {}", path.display()).into())
    }

    fn append(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(format!("Read-only filesystem: {}", path.display()).into());
        }
        let mut files = self.files.lock().expect("files lock poisoned");
        files.entry(path.to_path_buf()).or_default().push_str(contents);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().expect("files lock poisoned").contains_key(path)
    }
}

/// Tracker that serves a fixed bug list and records every call.
///
/// Clones share the call log.
#[derive(Clone, Default)]
pub struct ScriptedTracker {
    bugs: Vec<Bug>,
    rejected: HashSet<BugId>,
    refuse_login: bool,
    fail_search: bool,
    calls: Arc<Mutex<Vec<TrackerCall>>>,
}

/// A call observed by [`ScriptedTracker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerCall {
    /// `authenticate()`.
    Authenticate,
    /// `search(query)`.
    Search(BugQuery),
    /// `update(ids, update)`.
    Update {
        /// Bugs named in the call.
        ids: Vec<BugId>,
        /// Submitted payload.
        update: BugUpdate,
    },
}

impl ScriptedTracker {
    /// Creates a tracker whose searches return `bugs`.
    #[must_use]
    pub fn new(bugs: Vec<Bug>) -> Self {
        Self { bugs, ..Self::default() }
    }

    /// Builds a bug with a predictable assignee and URL.
    #[must_use]
    pub fn bug(id: u64) -> Bug {
        Bug {
            id: BugId::new(id),
            assigned_to: format!("owner{id}@example.com"),
            status: "NEW".to_string(),
            weburl: format!("https://bugzilla.example/show_bug.cgi?id={id}"),
        }
    }

    /// Makes updates naming `id` fail.
    #[must_use]
    pub fn rejecting(mut self, id: u64) -> Self {
        self.rejected.insert(BugId::new(id));
        self
    }

    /// Makes `authenticate` fail.
    #[must_use]
    pub fn refusing_login(mut self) -> Self {
        self.refuse_login = true;
        self
    }

    /// Makes `search` fail.
    #[must_use]
    pub fn failing_search(mut self) -> Self {
        self.fail_search = true;
        self
    }

    /// Every call received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<TrackerCall> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    /// Ids named in update calls, in order.
    #[must_use]
    pub fn updated_ids(&self) -> Vec<BugId> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                TrackerCall::Update { ids, .. } => Some(ids),
                _ => None,
            })
            .flatten()
            .collect()
    }

    fn log(&self, call: TrackerCall) {
        self.calls.lock().expect("calls lock poisoned").push(call);
    }
}

impl BugTracker for ScriptedTracker {
    fn authenticate(&self) -> TrackerFuture<'_, ()> {
        self.log(TrackerCall::Authenticate);
        let result: Result<(), PortError> = if self.refuse_login {
            Err("Login failed: invalid username or password".into())
        } else {
            Ok(())
        };
        Box::pin(ready(result))
    }

    fn search<'a>(&'a self, query: &'a BugQuery) -> TrackerFuture<'a, Vec<Bug>> {
        self.log(TrackerCall::Search(query.clone()));
        let result: Result<Vec<Bug>, PortError> =
            if self.fail_search { Err("Search timed out".into()) } else { Ok(self.bugs.clone()) };
        Box::pin(ready(result))
    }

    fn update<'a>(&'a self, ids: &'a [BugId], update: &'a BugUpdate) -> TrackerFuture<'a, ()> {
        self.log(TrackerCall::Update { ids: ids.to_vec(), update: update.clone() });
        let result: Result<(), PortError> =
            match ids.iter().find(|id| self.rejected.contains(id)) {
                Some(id) => Err(format!("Bug {id}: you are not allowed to set needinfo").into()),
                None => Ok(()),
            };
        Box::pin(ready(result))
    }
}
