//! Runner error types.

use crate::cache::CacheError;
use crate::directory::DirectoryError;
use crate::freshness::FreshnessError;
use crate::policy::PolicyViolation;
use crate::sync::SyncError;
use thiserror::Error;

/// Errors that end a fleet scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Repository cache could not be read, written or cleared.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Repository listing could not be fetched.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// A repository failed synchronization or one of its checks.
    #[error("Repository '{repository}': {cause}")]
    Repository {
        repository: String,
        #[source]
        cause: RepositoryFailure,
    },
}

/// Why a single repository failed.
#[derive(Debug, Error)]
pub enum RepositoryFailure {
    /// Working copy could not be synchronized.
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// Repository settings break policy.
    #[error("Policy violation: {0}")]
    Policy(#[from] PolicyViolation),

    /// Version-detection tools failed.
    #[error(transparent)]
    Freshness(#[from] FreshnessError),

    /// Upstream released a version the package does not track yet.
    #[error("Package has a new upstream version: {details}")]
    Outdated { details: String },
}
