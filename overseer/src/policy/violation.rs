//! Policy violation types.

use thiserror::Error;

/// A repository setting that breaks organization policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyViolation {
    #[error("Default branch must be 'main' not '{actual}'")]
    DefaultBranch { actual: String },

    #[error("Repository should not be a template")]
    Template,

    #[error("Issues must be enabled")]
    IssuesDisabled,

    #[error("Wiki must be disabled")]
    WikiEnabled,

    #[error("Pages must be disabled")]
    PagesEnabled,

    #[error("Projects must be disabled")]
    ProjectsEnabled,

    #[error("Discussions must be disabled")]
    DiscussionsEnabled,
}
