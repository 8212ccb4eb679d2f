//! Runner configuration.

use std::path::{Path, PathBuf};

/// Configuration for a fleet scan.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Directory holding `repos.jsonl` and the working copies.
    cache_dir: PathBuf,
    /// Whether to wipe the cache before scanning.
    clear_cache: bool,
    /// Whether to ask the version-detection tools for upstream updates.
    check_updates: bool,
    /// Whether to validate repository settings against policy.
    check_repository_settings: bool,
}

impl RunnerConfig {
    /// Creates a configuration with every check enabled and the cache kept.
    pub fn new(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            clear_cache: false,
            check_updates: true,
            check_repository_settings: true,
        }
    }

    /// Requests a cache wipe before the scan.
    pub fn with_clear_cache(mut self, clear_cache: bool) -> Self {
        self.clear_cache = clear_cache;
        self
    }

    /// Enables or disables the upstream update check.
    pub fn with_check_updates(mut self, check_updates: bool) -> Self {
        self.check_updates = check_updates;
        self
    }

    /// Enables or disables the repository settings check.
    pub fn with_check_repository_settings(mut self, check_repository_settings: bool) -> Self {
        self.check_repository_settings = check_repository_settings;
        self
    }

    /// Returns the cache directory.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns whether the cache is wiped first.
    pub fn clear_cache(&self) -> bool {
        self.clear_cache
    }

    /// Returns whether upstream updates are checked.
    pub fn check_updates(&self) -> bool {
        self.check_updates
    }

    /// Returns whether repository settings are checked.
    pub fn check_repository_settings(&self) -> bool {
        self.check_repository_settings
    }
}
