//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the reminder workflow and an
//! external system (bug tracker, filesystem, operator prompt).
//! Implementations live in `src/adapters/`.

pub mod filesystem;
pub mod prompt;
pub mod tracker;

pub use filesystem::FileSystem;
pub use prompt::{CredentialPrompt, Credentials};
pub use tracker::{Bug, BugId, BugQuery, BugTracker, BugUpdate, Flag, TrackerFuture};
