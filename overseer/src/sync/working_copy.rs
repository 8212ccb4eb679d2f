//! Local checkout bound to a repository.

use std::path::{Path, PathBuf};

/// A checkout of a repository's default branch inside the cache directory.
///
/// After a successful sync the contents match the remote branch tip exactly:
/// no local modifications, no untracked or ignored files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingCopy {
    name: String,
    path: PathBuf,
}

impl WorkingCopy {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Name of the repository this copy belongs to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory of the checkout.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
