//! Clone synchronization error types.

use crate::process::ProcessError;
use thiserror::Error;

/// Errors that can occur while synchronizing a working copy.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Repository name cannot be used as a directory name.
    #[error("Repository name '{name}' is not a valid directory name")]
    InvalidName { name: String },

    /// Default branch name cannot be passed to git safely.
    #[error("Repository '{repository}' has an unusable default branch '{branch}'")]
    InvalidBranch { repository: String, branch: String },

    /// Failed to prepare the cache directory.
    #[error("Failed to create '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A git command failed.
    #[error("Failed to synchronize '{repository}': {source}")]
    Git {
        repository: String,
        #[source]
        source: ProcessError,
    },
}
