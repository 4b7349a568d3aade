//! Deployment profiles and the run configuration derived from them.

use std::path::PathBuf;

use clap::ValueEnum;

use crate::ports::{BugId, BugQuery};
use crate::reminder::TEMPLATE;

/// File name of the ledger of already-reminded bugs.
pub const LEDGER_FILE_NAME: &str = "ALREADY_FILLED";

/// Named deployment presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Profile {
    /// Partner staging instance with a throwaway tracker bug.
    #[default]
    Testing,
    /// The real Fedora F29 FTBFS tracker.
    Production,
}

impl Profile {
    /// Base URL of the tracker instance.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Testing => "https://partner-bugzilla.redhat.com",
            Self::Production => "https://bugzilla.redhat.com",
        }
    }

    /// Tracker bug that FTBFS reports block.
    #[must_use]
    pub const fn tracker_bug(self) -> BugId {
        match self {
            Self::Testing => BugId::new(1_626_028),
            Self::Production => BugId::new(1_602_938),
        }
    }
}

/// Everything a reminder run needs to know up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderConfig {
    /// Tracker base URL.
    pub base_url: String,
    /// Umbrella bug the FTBFS reports block.
    pub tracker_bug: BugId,
    /// Product to search.
    pub product: String,
    /// Product version to search.
    pub version: String,
    /// Bug status that still needs a reminder.
    pub status: String,
    /// Comment posted on every reminded bug.
    pub comment: String,
    /// Ledger of bugs reminded in earlier runs.
    pub ledger_path: PathBuf,
}

impl ReminderConfig {
    /// Builds the configuration for `profile`, keeping the ledger at `ledger_path`.
    #[must_use]
    pub fn for_profile(profile: Profile, ledger_path: PathBuf) -> Self {
        Self {
            base_url: profile.base_url().to_string(),
            tracker_bug: profile.tracker_bug(),
            product: "Fedora".to_string(),
            version: "29".to_string(),
            status: "NEW".to_string(),
            comment: TEMPLATE.to_string(),
            ledger_path,
        }
    }

    /// The discovery search for this configuration.
    #[must_use]
    pub fn query(&self) -> BugQuery {
        BugQuery {
            product: self.product.clone(),
            status: self.status.clone(),
            version: self.version.clone(),
            blocks: self.tracker_bug,
        }
    }
}

/// Ledger location next to the running executable.
///
/// # Errors
///
/// Returns an error if the executable path cannot be determined.
pub fn default_ledger_path() -> Result<PathBuf, String> {
    let exe = std::env::current_exe()
        .map_err(|e| format!("Failed to locate the running executable: {e}"))?;
    let dir = exe.parent().map_or_else(|| PathBuf::from("."), PathBuf::from);
    Ok(dir.join(LEDGER_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_point_at_distinct_trackers() {
        assert_eq!(Profile::Testing.tracker_bug(), BugId::new(1_626_028));
        assert_eq!(Profile::Production.tracker_bug(), BugId::new(1_602_938));
        assert!(Profile::Testing.base_url().contains("partner-bugzilla"));
        assert_eq!(Profile::Production.base_url(), "https://bugzilla.redhat.com");
    }

    #[test]
    fn default_profile_is_testing() {
        assert_eq!(Profile::default(), Profile::Testing);
    }

    #[test]
    fn query_targets_new_f29_bugs_blocking_tracker() {
        let config = ReminderConfig::for_profile(Profile::Production, PathBuf::from("ledger"));
        let query = config.query();
        assert_eq!(query.product, "Fedora");
        assert_eq!(query.status, "NEW");
        assert_eq!(query.version, "29");
        assert_eq!(query.blocks, BugId::new(1_602_938));
    }

    #[test]
    fn default_ledger_sits_beside_executable() {
        let path = default_ledger_path().unwrap();
        assert_eq!(path.file_name().unwrap(), LEDGER_FILE_NAME);
        let exe = std::env::current_exe().unwrap();
        assert_eq!(path.parent(), exe.parent());
    }
}
