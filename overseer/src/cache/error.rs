//! Repository cache error types.

use thiserror::Error;

/// Errors that can occur while reading or writing the repository cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Filesystem operation failed.
    #[error("Failed to access cache '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The cache directory exists but has no repository list.
    #[error("Cache directory exists but '{path}' is missing; rerun with --clear-cache")]
    MissingIndex { path: String },

    /// A line of the repository list is not a valid descriptor.
    #[error("Malformed cache entry at '{path}' line {line}: {source}; rerun with --clear-cache")]
    MalformedEntry {
        path: String,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A descriptor could not be serialized.
    #[error("Failed to serialize repository '{name}': {source}")]
    Serialize {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}
