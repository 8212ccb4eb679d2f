//! Repository metadata snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One repository of the fleet as reported by the hosting API.
///
/// Field names follow the API payload so pages deserialize directly; fields
/// the scanner does not use are ignored. Descriptors are never mutated after
/// a fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryDescriptor {
    /// Repository name, unique within the organization.
    pub name: String,

    /// Whether the repository is private.
    pub private: bool,

    /// Whether the repository is archived.
    pub archived: bool,

    /// Whether the repository is marked as a template.
    pub is_template: bool,

    /// HTTPS clone URL.
    pub clone_url: String,

    /// Default branch name (e.g., "main").
    pub default_branch: String,

    pub has_issues: bool,
    pub has_wiki: bool,
    pub has_pages: bool,
    pub has_projects: bool,
    #[serde(default)]
    pub has_discussions: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Open issues and pull requests.
    pub open_issues_count: u64,
}

impl RepositoryDescriptor {
    /// Returns true for public, non-archived repositories.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.private && !self.archived
    }
}
