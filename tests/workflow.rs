//! End-to-end reminder runs against an in-memory tracker and a real ledger file.

use std::collections::HashSet;
use std::path::PathBuf;

use ftbfs_reminder::adapters::live::filesystem::LiveFileSystem;
use ftbfs_reminder::adapters::memory::ScriptedTracker;
use ftbfs_reminder::context::ServiceContext;
use ftbfs_reminder::error::ReminderError;
use ftbfs_reminder::ledger::Ledger;
use ftbfs_reminder::ports::BugId;
use ftbfs_reminder::profile::{Profile, ReminderConfig, LEDGER_FILE_NAME};
use ftbfs_reminder::progress::{ConsoleProgress, SilentProgress};
use ftbfs_reminder::workflow::run_reminders;

/// Fresh directory for one test's ledger.
fn ledger_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("ftbfs_reminder_it_{name}"));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn context(tracker: &ScriptedTracker) -> ServiceContext {
    ServiceContext { tracker: Box::new(tracker.clone()), fs: Box::new(LiveFileSystem) }
}

fn tracker(ids: &[u64]) -> ScriptedTracker {
    ScriptedTracker::new(ids.iter().copied().map(ScriptedTracker::bug).collect())
}

#[tokio::test]
async fn partial_failure_scenario() {
    let dir = ledger_dir("partial_failure");
    let ledger_path = dir.join(LEDGER_FILE_NAME);
    std::fs::write(&ledger_path, "101\n").unwrap();
    let tracker = tracker(&[101, 102, 103]).rejecting(103);
    let config = ReminderConfig::for_profile(Profile::Production, ledger_path.clone());

    let report = run_reminders(&context(&tracker), &config, &SilentProgress).await.unwrap();

    assert_eq!(report.updated, vec![BugId::new(102)]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].weburl, "https://bugzilla.example/show_bug.cgi?id=103");
    assert!(!tracker.updated_ids().contains(&BugId::new(101)));

    let recorded = Ledger::new(&LiveFileSystem, &ledger_path).load().unwrap();
    assert_eq!(recorded, HashSet::from([BugId::new(101), BugId::new(102)]));
    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn interrupted_run_resumes_without_duplicates() {
    let dir = ledger_dir("resume");
    let ledger_path = dir.join(LEDGER_FILE_NAME);
    let config = ReminderConfig::for_profile(Profile::Testing, ledger_path.clone());

    let first = tracker(&[1, 2]);
    run_reminders(&context(&first), &config, &SilentProgress).await.unwrap();

    let second = tracker(&[1, 2, 3]);
    let report = run_reminders(&context(&second), &config, &SilentProgress).await.unwrap();

    assert_eq!(report.updated, vec![BugId::new(3)]);
    assert_eq!(second.updated_ids(), vec![BugId::new(3)]);
    assert_eq!(std::fs::read_to_string(&ledger_path).unwrap(), "1\n2\n3\n");
    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn corrupt_ledger_stops_run() {
    let dir = ledger_dir("corrupt");
    let ledger_path = dir.join(LEDGER_FILE_NAME);
    std::fs::write(&ledger_path, "12\n1.5\n").unwrap();
    let tracker = tracker(&[12, 13]);
    let config = ReminderConfig::for_profile(Profile::Testing, ledger_path);

    let err = run_reminders(&context(&tracker), &config, &SilentProgress).await.unwrap_err();

    assert!(matches!(err, ReminderError::LedgerParse { line: 2, .. }));
    assert!(tracker.updated_ids().is_empty());
    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn no_bugs_leaves_no_ledger() {
    let dir = ledger_dir("no_bugs");
    let ledger_path = dir.join(LEDGER_FILE_NAME);
    let tracker = tracker(&[]);
    let config = ReminderConfig::for_profile(Profile::Testing, ledger_path.clone());

    let report = run_reminders(&context(&tracker), &config, &SilentProgress).await.unwrap();

    assert!(report.updated.is_empty());
    assert!(report.is_clean());
    assert!(!ledger_path.exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn progress_sees_every_discovered_bug() {
    let dir = ledger_dir("progress");
    let ledger_path = dir.join(LEDGER_FILE_NAME);
    std::fs::write(&ledger_path, "8\n").unwrap();
    let tracker = tracker(&[7, 8]);
    let config = ReminderConfig::for_profile(Profile::Testing, ledger_path);
    let progress = ConsoleProgress::new(Vec::new());

    run_reminders(&context(&tracker), &config, &progress).await.unwrap();

    let text = String::from_utf8(progress.into_inner()).unwrap();
    assert!(text.contains("[1/2] https://bugzilla.example/show_bug.cgi?id=7"));
    assert!(text.contains("[2/2] https://bugzilla.example/show_bug.cgi?id=8"));
    assert!(text.ends_with("Finished!\n"));
    let _ = std::fs::remove_dir_all(&dir);
}
