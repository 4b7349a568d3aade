//! The reminder run: discover NEW FTBFS bugs, skip the ones already in the
//! ledger, and ask every remaining assignee for an update.
//!
//! The run is strictly sequential. Each successful reminder is written to
//! the ledger before the next bug is touched, so stopping the process at
//! any point leaves a ledger that is safe to resume from.

use std::collections::HashSet;
use std::io::{self, Write};

use crate::context::ServiceContext;
use crate::error::ReminderError;
use crate::ledger::Ledger;
use crate::ports::{Bug, BugId, BugTracker};
use crate::profile::ReminderConfig;
use crate::progress::Progress;
use crate::reminder::build_update;

/// Outcome of a single run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Bugs returned by the discovery search.
    pub found: usize,
    /// Discovered bugs skipped because they were already reminded.
    pub skipped: usize,
    /// Bugs reminded during this run, in order.
    pub updated: Vec<BugId>,
    /// Bugs whose update failed; they stay eligible for the next run.
    pub failed: Vec<Bug>,
}

impl RunReport {
    /// Returns `true` when no reminder failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    /// Writes the end-of-run summary: the updated count to `out`, and the
    /// failure count plus each failed URL to `err`.
    ///
    /// # Errors
    ///
    /// Returns an error if either writer fails.
    pub fn write_summary(&self, out: &mut impl Write, err: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Updated {} bugz", self.updated.len())?;
        if !self.failed.is_empty() {
            writeln!(err, "Failed to update {} bugz", self.failed.len())?;
            for bug in &self.failed {
                writeln!(err, "{}", bug.weburl)?;
            }
        }
        Ok(())
    }

    /// Prints the summary to stdout and stderr.
    pub fn print_summary(&self) {
        let _ = self.write_summary(&mut io::stdout().lock(), &mut io::stderr().lock());
    }
}

/// Runs one reminder pass.
///
/// # Errors
///
/// Returns a [`ReminderError`] if authentication fails, the ledger is
/// unreadable or malformed, the search fails, or a sent reminder cannot be
/// recorded. Individual update failures are reported in
/// [`RunReport::failed`] instead.
pub async fn run_reminders(
    ctx: &ServiceContext,
    config: &ReminderConfig,
    progress: &dyn Progress,
) -> Result<RunReport, ReminderError> {
    ctx.tracker
        .authenticate()
        .await
        .map_err(|source| ReminderError::Authentication { endpoint: config.base_url.clone(), source })?;

    let ledger = Ledger::new(ctx.fs.as_ref(), &config.ledger_path);
    if ledger.exists() {
        println!(
            "Loading bug IDs from {path}. Will not fill those. Remove {path} to stop this from happening.",
            path = ledger.path().display()
        );
    }
    let mut reminded = ledger.load()?;
    tracing::debug!(entries = reminded.len(), path = %ledger.path().display(), "ledger loaded");

    println!("Gathering bugz, this can take a while...");
    let query = config.query();
    tracing::info!(?query, "searching");
    let bugs = ctx.tracker.search(&query).await.map_err(ReminderError::Search)?;

    let discovered: HashSet<BugId> = bugs.iter().map(|bug| bug.id).collect();
    let pending = discovered.difference(&reminded).count();
    println!("There are {} NEW bugz, will send a reminder", bugs.len());
    if !reminded.is_empty() {
        println!("Will ignore {} bugz from {}", reminded.len(), ledger.path().display());
        println!("Will update {pending} bugz");
    }

    let mut report = RunReport { found: bugs.len(), ..RunReport::default() };
    progress.start(bugs.len());
    for bug in &bugs {
        progress.visit(bug);
        if reminded.contains(&bug.id) {
            report.skipped += 1;
            continue;
        }
        if send_reminder(ctx.tracker.as_ref(), &ledger, bug, &config.comment, &mut report).await? {
            reminded.insert(bug.id);
        }
    }
    progress.finish();

    tracing::info!(
        found = report.found,
        skipped = report.skipped,
        updated = report.updated.len(),
        failed = report.failed.len(),
        "run finished"
    );
    Ok(report)
}

/// Sends one reminder. Returns `Ok(true)` when the bug was updated and recorded.
async fn send_reminder(
    tracker: &dyn BugTracker,
    ledger: &Ledger<'_>,
    bug: &Bug,
    comment: &str,
    report: &mut RunReport,
) -> Result<bool, ReminderError> {
    let update = build_update(bug, comment);
    match tracker.update(&[bug.id], &update).await {
        Ok(()) => {
            tracing::info!(bug = %bug.id, assignee = %bug.assigned_to, "reminder sent");
            report.updated.push(bug.id);
            ledger.record(bug.id)?;
            Ok(true)
        }
        Err(e) => {
            tracing::error!(bug = %bug.id, url = %bug.weburl, error = %e, "failed to update bug");
            report.failed.push(bug.clone());
            Ok(false)
        }
    }
}
