//! Bug tracker port for searching and updating bug reports.

use std::error::Error;
use std::fmt;
use std::future::Future;
use std::num::ParseIntError;
use std::pin::Pin;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Boxed future type alias used by [`BugTracker`] to keep the trait dyn-compatible.
pub type TrackerFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// Numeric identifier the tracker assigns to a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BugId(u64);

impl BugId {
    /// Wraps a raw tracker identifier.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BugId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BugId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A bug as reported by the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bug {
    /// The tracker identifier.
    pub id: BugId,
    /// Account the bug is assigned to.
    pub assigned_to: String,
    /// Current status (e.g. `NEW`, `ASSIGNED`).
    pub status: String,
    /// Browser URL of the bug page.
    pub weburl: String,
}

/// Search filter for a single tracker query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BugQuery {
    /// Product the bugs are filed against.
    pub product: String,
    /// Bug status to match.
    pub status: String,
    /// Product version to match.
    pub version: String,
    /// Only bugs blocking this tracker bug are returned.
    pub blocks: BugId,
}

/// A flag change applied to a bug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flag {
    /// Flag name, e.g. `needinfo`.
    pub name: String,
    /// Account the flag is addressed to.
    pub requestee: String,
    /// Status symbol: `?` requests, `+`/`-` grant or deny, `X` clears.
    pub status: String,
}

/// A comment plus flag changes submitted in one update call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugUpdate {
    /// Free-text comment appended to the bug.
    pub comment: String,
    /// Flags set alongside the comment.
    pub flags: Vec<Flag>,
}

/// Queries and updates bugs in an external tracker.
///
/// Abstracting the tracker lets the reminder workflow run against a fake
/// in tests without network access or interactive login.
pub trait BugTracker: Send + Sync {
    /// Establishes a session, running an interactive login when no cached
    /// credentials are available.
    ///
    /// # Errors
    ///
    /// Returns an error if no session could be established.
    fn authenticate(&self) -> TrackerFuture<'_, ()>;

    /// Returns every bug matching `query` in a single call.
    ///
    /// # Errors
    ///
    /// Returns an error if the search request fails.
    fn search<'a>(&'a self, query: &'a BugQuery) -> TrackerFuture<'a, Vec<Bug>>;

    /// Applies `update` to each bug in `ids`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tracker rejects the update or the request fails.
    fn update<'a>(&'a self, ids: &'a [BugId], update: &'a BugUpdate) -> TrackerFuture<'a, ()>;
}
