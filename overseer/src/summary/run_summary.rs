//! Scan summary types.

use super::result::RepositoryOutcome;

/// Summary of a completed scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Number of repositories in the fleet listing.
    pub repositories_total: usize,

    /// Number of packages synchronized and checked.
    pub packages_checked: usize,

    /// Number of repositories skipped (archived, private or internal).
    pub repositories_skipped: usize,

    /// Whether the repository list came from the cache.
    pub cache_reused: bool,

    /// Whether repository settings were checked.
    pub check_repository_settings: bool,

    /// Whether upstream updates were checked.
    pub check_updates: bool,
}

impl ScanSummary {
    /// Creates a new empty summary for the enabled checks.
    #[must_use]
    pub fn new(check_repository_settings: bool, check_updates: bool) -> Self {
        Self {
            check_repository_settings,
            check_updates,
            ..Default::default()
        }
    }

    /// Updates the summary with a repository outcome.
    pub fn record(&mut self, outcome: &RepositoryOutcome) {
        match outcome {
            RepositoryOutcome::Checked { .. } => self.packages_checked += 1,
            RepositoryOutcome::Skipped { .. } => self.repositories_skipped += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::result::SkipReason;

    #[test]
    fn can_record_outcomes() {
        let mut summary = ScanSummary::new(true, false);

        summary.record(&RepositoryOutcome::Checked {
            repository: "zlib".to_string(),
        });
        summary.record(&RepositoryOutcome::Skipped {
            repository: ".github".to_string(),
            reason: SkipReason::Internal,
        });
        summary.record(&RepositoryOutcome::Checked {
            repository: "libpng".to_string(),
        });

        assert_eq!(summary.packages_checked, 2);
        assert_eq!(summary.repositories_skipped, 1);
        assert!(summary.check_repository_settings);
        assert!(!summary.check_updates);
    }
}
