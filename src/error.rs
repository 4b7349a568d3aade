//! Fatal error taxonomy for a reminder run.
//!
//! Anything in [`ReminderError`] aborts the run. Failures while updating a
//! single bug never become a `ReminderError`; the workflow records them in
//! [`crate::workflow::RunReport::failed`] and moves on.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error type carried across port boundaries.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that abort a reminder run.
#[derive(Debug, Error)]
pub enum ReminderError {
    /// No tracker session could be established.
    #[error("Failed to authenticate with {endpoint}: {source}")]
    Authentication {
        /// Tracker base URL.
        endpoint: String,
        /// Underlying failure.
        #[source]
        source: PortError,
    },

    /// The ledger exists but could not be read.
    #[error("Failed to read ledger {}: {source}", path.display())]
    LedgerRead {
        /// Ledger file path.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: PortError,
    },

    /// The ledger holds a line that is not a bug identifier.
    #[error("Malformed ledger {} line {line}: {content:?} is not a bug id", path.display())]
    LedgerParse {
        /// Ledger file path.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// The offending line.
        content: String,
    },

    /// A reminder was sent but could not be recorded.
    #[error("Failed to append bug {bug} to ledger {}: {source}", path.display())]
    LedgerWrite {
        /// Ledger file path.
        path: PathBuf,
        /// Bug that was reminded.
        bug: u64,
        /// Underlying failure.
        #[source]
        source: PortError,
    },

    /// The discovery search failed.
    #[error("Bug search failed: {0}")]
    Search(#[source] PortError),
}
