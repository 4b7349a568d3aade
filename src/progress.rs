//! Console feedback while iterating over discovered bugs.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use crate::ports::Bug;

/// Observes iteration; must not influence the run.
pub trait Progress {
    /// Called once with the number of bugs about to be visited.
    fn start(&self, total: usize);

    /// Called once per discovered bug, in search order, before any update.
    fn visit(&self, bug: &Bug);

    /// Called after the last bug.
    fn finish(&self);
}

/// Prints `[i/n] <url>` lines followed by `Finished!`.
pub struct ConsoleProgress<W: Write> {
    state: Mutex<ConsoleState<W>>,
}

struct ConsoleState<W> {
    total: usize,
    seen: usize,
    out: W,
}

impl ConsoleProgress<std::io::Stdout> {
    /// Writes to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleProgress<W> {
    /// Writes to `out`.
    pub fn new(out: W) -> Self {
        Self { state: Mutex::new(ConsoleState { total: 0, seen: 0, out }) }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.state.into_inner().unwrap_or_else(PoisonError::into_inner).out
    }
}

impl<W: Write> Progress for ConsoleProgress<W> {
    fn start(&self, total: usize) {
        let Ok(mut state) = self.state.lock() else { return };
        state.total = total;
        state.seen = 0;
    }

    fn visit(&self, bug: &Bug) {
        let Ok(mut state) = self.state.lock() else { return };
        state.seen += 1;
        let ConsoleState { total, seen, out } = &mut *state;
        // Output errors are cosmetic.
        let _ = writeln!(out, "[{seen}/{total}] {}", bug.weburl);
        let _ = out.flush();
    }

    fn finish(&self) {
        let Ok(mut state) = self.state.lock() else { return };
        let _ = writeln!(state.out, "Finished!");
        let _ = state.out.flush();
    }
}

/// Discards all progress.
pub struct SilentProgress;

impl Progress for SilentProgress {
    fn start(&self, _total: usize) {}

    fn visit(&self, _bug: &Bug) {}

    fn finish(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::ScriptedTracker;

    #[test]
    fn console_progress_numbers_each_bug() {
        let progress = ConsoleProgress::new(Vec::new());
        progress.start(2);
        progress.visit(&ScriptedTracker::bug(11));
        progress.visit(&ScriptedTracker::bug(12));
        progress.finish();

        let text = String::from_utf8(progress.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "[1/2] https://bugzilla.example/show_bug.cgi?id=11",
                "[2/2] https://bugzilla.example/show_bug.cgi?id=12",
                "Finished!",
            ]
        );
    }

    /// Writer whose first write panics.
    struct Flaky {
        tripped: bool,
        buf: Vec<u8>,
    }

    impl Write for Flaky {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if !self.tripped {
                self.tripped = true;
                panic!("terminal went away");
            }
            self.buf.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn poisoned_progress_goes_quiet_instead_of_panicking() {
        let progress = ConsoleProgress::new(Flaky { tripped: false, buf: Vec::new() });
        progress.start(2);
        let bug = ScriptedTracker::bug(1);
        let visit = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| progress.visit(&bug)));
        assert!(visit.is_err());

        progress.visit(&ScriptedTracker::bug(2));
        progress.finish();

        assert!(progress.into_inner().buf.is_empty());
    }
}
