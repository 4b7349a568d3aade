//! The reminder payload: comment text and need-info flag.

use crate::ports::{Bug, BugUpdate, Flag};

/// Comment posted on every NEW FTBFS bug.
pub const TEMPLATE: &str = "Dear Maintainer,

your package has not been built successfully in F29. Action is required from you.

If you can fix your package to build, perform a build in koji, and either create
an update in bodhi, or close this bug without creating an update, if updating is
not appropriate [1]. If you are working on a fix, set the status to ASSIGNED to
acknowledge this. Following the latest policy for such packages [2], your package
will be orphaned if this bug remains in NEW state more than 8 weeks.

[1] https://fedoraproject.org/wiki/Updates_Policy
[2] https://fedoraproject.org/wiki/Fails_to_build_from_source#Package_Removal_for_Long-standing_FTBFS_bugs
";

/// A need-info request addressed to `requestee`.
#[must_use]
pub fn needinfo(requestee: &str) -> Flag {
    Flag { name: "needinfo".to_string(), requestee: requestee.to_string(), status: "?".to_string() }
}

/// Builds the update for `bug`: `comment` plus a need-info on its assignee.
#[must_use]
pub fn build_update(bug: &Bug, comment: &str) -> BugUpdate {
    BugUpdate { comment: comment.to_string(), flags: vec![needinfo(&bug.assigned_to)] }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::BugId;

    #[test]
    fn needinfo_requests_from_assignee() {
        let bug = Bug {
            id: BugId::new(42),
            assigned_to: "maint@example.com".to_string(),
            status: "NEW".to_string(),
            weburl: "https://bz.example/show_bug.cgi?id=42".to_string(),
        };
        let update = build_update(&bug, TEMPLATE);

        assert_eq!(update.comment, TEMPLATE);
        assert_eq!(update.flags.len(), 1);
        assert_eq!(update.flags[0].name, "needinfo");
        assert_eq!(update.flags[0].requestee, "maint@example.com");
        assert_eq!(update.flags[0].status, "?");
    }

    #[test]
    fn template_references_policy_links() {
        assert!(TEMPLATE.starts_with("Dear Maintainer,"));
        assert!(TEMPLATE.contains("Updates_Policy"));
        assert!(TEMPLATE.contains("8 weeks"));
    }
}
