//! CLI argument definitions.

use clap::Parser;

use crate::profile::Profile;

/// Top-level CLI parser for `ftbfs-reminder`.
#[derive(Debug, Parser)]
#[command(
    name = "ftbfs-reminder",
    version,
    about = "Ask assignees of NEW FTBFS bugs for a status update"
)]
pub struct Cli {
    /// Deployment to run against.
    #[arg(long, value_enum, default_value_t = Profile::Testing)]
    pub profile: Profile,
}
