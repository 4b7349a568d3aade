//! Live adapters for real external interactions.

pub mod bugzilla;
pub mod filesystem;
pub mod prompt;
