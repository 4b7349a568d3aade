//! Core library entry for the `ftbfs-reminder` CLI.

pub mod adapters;
pub mod cli;
pub mod context;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod ports;
pub mod profile;
pub mod progress;
pub mod reminder;
pub mod workflow;

use std::path::Path;

use crate::context::ServiceContext;
use crate::profile::ReminderConfig;
use crate::progress::ConsoleProgress;
use crate::workflow::RunReport;

/// Exit status for a run that finished but could not remind every bug.
pub const EXIT_SOME_FAILED: u8 = 3;

/// Run one reminder pass against the live tracker selected by `cli`.
///
/// # Errors
///
/// Returns an error string when setup fails or the run aborts (login,
/// search, or ledger failure). Per-bug update failures are not errors;
/// they are listed in the returned report.
pub fn run(cli: &cli::Cli) -> Result<RunReport, String> {
    logging::init(Path::new(logging::LOG_FILE))?;

    let config = ReminderConfig::for_profile(cli.profile, profile::default_ledger_path()?);
    tracing::info!(profile = ?cli.profile, endpoint = %config.base_url, "starting run");
    let ctx = ServiceContext::live(&config.base_url)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;

    let progress = ConsoleProgress::stdout();
    let report = runtime
        .block_on(workflow::run_reminders(&ctx, &config, &progress))
        .map_err(|err| {
            tracing::error!(error = %err, "run aborted");
            err.to_string()
        })?;

    report.print_summary();
    Ok(report)
}
