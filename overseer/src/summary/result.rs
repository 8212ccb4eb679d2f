//! Per-repository outcome types.

/// Result of visiting a single repository during a scan.
///
/// Failures are not represented here: the first failure ends the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryOutcome {
    /// Working copy synchronized and every enabled check passed.
    Checked {
        /// Repository name.
        repository: String,
    },

    /// Repository is not a package and was not touched.
    Skipped {
        /// Repository name.
        repository: String,
        /// Reason for skipping.
        reason: SkipReason,
    },
}

/// Why a repository is not treated as a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Archived,
    Private,
    Internal,
}

impl SkipReason {
    /// Returns the reason as a string for logging.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Archived => "archived",
            Self::Private => "private",
            Self::Internal => "internal",
        }
    }
}
