//! Version consistency error types.

use crate::process::ProcessError;
use std::fmt;
use thiserror::Error;

/// Where a version value was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSource {
    /// `.version` in `build.zig.zon`.
    Manifest,
    /// Upstream part of the manifest version.
    ManifestUpstream,
    /// Version requested by the caller.
    Reference,
    /// Latest reachable git tag.
    GitTag,
    /// `nvchecker` recorded state.
    TrackerState,
    /// First line of `README.md`.
    ReadmeHeader,
    /// Install command in `README.md`.
    ReadmeInstall,
}

impl fmt::Display for VersionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Manifest => "build.zig.zon",
            Self::ManifestUpstream => "build.zig.zon upstream",
            Self::Reference => "reference",
            Self::GitTag => "git tag",
            Self::TrackerState => "nvchecker state",
            Self::ReadmeHeader => "readme header",
            Self::ReadmeInstall => "readme install command",
        };
        f.write_str(name)
    }
}

/// Errors raised by the version consistency check.
#[derive(Debug, Error)]
pub enum VersioningError {
    /// Failed to read a file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The manifest has no `.version` field.
    #[error("No .version field found in '{path}'")]
    MissingManifestVersion { path: String },

    /// The manifest version does not follow the package version grammar.
    #[error("Invalid version in '{path}': version={version}")]
    InvalidVersion { path: String, version: String },

    /// Two sources disagree.
    #[error("Version from {expected_source} and {found_source} does not match: {expected_source}={expected}, {found_source}={found}")]
    Mismatch {
        expected_source: VersionSource,
        expected: String,
        found_source: VersionSource,
        found: String,
    },

    /// The documentation has no install command at all.
    #[error("Incorrect version in installation documentation: '{path}' has no 'zig fetch --save .../archive/refs/tags/{version}.tar.gz' line")]
    MissingInstallLine { path: String, version: String },

    /// The tracker state file is not in the expected shape.
    #[error("Failed to parse '{path}': {source}")]
    TrackerState {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Reading tags failed.
    #[error("Failed to read git tags: {0}")]
    Git(#[from] ProcessError),

    /// A search pattern could not be compiled.
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}
