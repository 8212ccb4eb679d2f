//! Repository directory error types.

use thiserror::Error;

/// Errors that can occur while fetching the repository directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// GitHub API error, including non-2xx responses and timeouts.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// A page request failed outside the API client.
    ///
    /// [`GitHubDirectory`](super::GitHubDirectory) reports everything through
    /// [`DirectoryError::GitHubError`]; this variant is for other
    /// [`RepositoryPages`](super::RepositoryPages) sources.
    #[error("Failed to fetch page {page} of '{org}' repositories: {message}")]
    PageFailed {
        org: String,
        page: u32,
        message: String,
    },
}
