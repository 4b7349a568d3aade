//! Service context bundling the port trait objects a run depends on.

use crate::adapters::live::bugzilla::LiveBugzilla;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::prompt::TerminalPrompt;
use crate::ports::filesystem::FileSystem;
use crate::ports::tracker::BugTracker;

/// Bundles all port trait objects into a single context.
///
/// Constructors wire up different adapter implementations; tests build the
/// struct directly from in-memory adapters.
pub struct ServiceContext {
    /// Bug tracker for searching and updating bugs.
    pub tracker: Box<dyn BugTracker>,
    /// Filesystem for the ledger.
    pub fs: Box<dyn FileSystem>,
}

impl ServiceContext {
    /// Creates a live context talking to the Bugzilla instance at `base_url`.
    ///
    /// A `BUGZILLA_API_KEY` in the environment (or a `.env` file) is used
    /// as the session; otherwise login prompts on the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn live(base_url: &str) -> Result<Self, String> {
        let _ = dotenvy::dotenv();
        let api_key = std::env::var("BUGZILLA_API_KEY").ok().filter(|key| !key.trim().is_empty());
        let tracker = LiveBugzilla::new(base_url, api_key, Box::new(TerminalPrompt))?;
        Ok(Self { tracker: Box::new(tracker), fs: Box::new(LiveFileSystem) })
    }
}
