//! Freshness check error types.

use crate::process::ProcessError;
use thiserror::Error;

/// Errors that can occur while asking the version-detection tools.
#[derive(Debug, Error)]
pub enum FreshnessError {
    /// `nvchecker` or `nvcmp` could not be run or exited unsuccessfully.
    #[error("Version check for '{repository}' failed: {source}")]
    Tool {
        repository: String,
        #[source]
        source: ProcessError,
    },
}
