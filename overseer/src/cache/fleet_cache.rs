//! Captured repository listing.

use crate::directory::RepositoryDescriptor;
use chrono::{DateTime, Utc};

/// Repository listing plus the moment it was captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetCache {
    captured_at: DateTime<Utc>,
    repositories: Vec<RepositoryDescriptor>,
}

impl FleetCache {
    /// Wraps a freshly fetched listing, stamped with the current time.
    pub fn new(repositories: Vec<RepositoryDescriptor>) -> Self {
        Self::captured(repositories, Utc::now())
    }

    /// Wraps a listing captured at a known time.
    pub fn captured(repositories: Vec<RepositoryDescriptor>, captured_at: DateTime<Utc>) -> Self {
        Self {
            captured_at,
            repositories,
        }
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    /// Repositories in directory order.
    pub fn repositories(&self) -> &[RepositoryDescriptor] {
        &self.repositories
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }
}
