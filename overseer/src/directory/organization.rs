//! Organization-level view of the fleet.

use super::RepositoryDescriptor;
use std::collections::BTreeSet;

/// The organization that owns the fleet and its meta-repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    name: String,
    internal: BTreeSet<String>,
}

impl Organization {
    /// Creates an organization with its internal repository names.
    pub fn new(name: impl Into<String>, internal: impl IntoIterator<Item = String>) -> Self {
        Self {
            name: name.into(),
            internal: internal.into_iter().collect(),
        }
    }

    /// Returns the organization login.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true for the organization's own meta-repositories.
    #[must_use]
    pub fn is_internal(&self, repository: &str) -> bool {
        self.internal.contains(repository)
    }

    /// Returns true if the repository is an active, non-internal package.
    #[must_use]
    pub fn is_package(&self, repository: &RepositoryDescriptor) -> bool {
        repository.is_active() && !self.is_internal(&repository.name)
    }

    /// Filters a repository list down to packages, keeping order.
    pub fn packages<'a>(&self, repositories: &'a [RepositoryDescriptor]) -> Vec<&'a RepositoryDescriptor> {
        repositories
            .iter()
            .filter(|repo| self.is_package(repo))
            .collect()
    }

    /// Returns the web URL of a package repository.
    #[must_use]
    pub fn package_url(&self, repository: &str) -> String {
        format!("https://github.com/{}/{}", self.name, repository)
    }
}
