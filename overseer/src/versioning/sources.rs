//! Readers for the individual version sources of a working copy.

use super::VersioningError;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

/// `nvchecker` state document: `{"data": {"upstream": {"version": ..}}}`.
#[derive(Debug, Deserialize)]
struct TrackerState {
    data: TrackerData,
}

#[derive(Debug, Deserialize)]
struct TrackerData {
    upstream: TrackerEntry,
}

#[derive(Debug, Deserialize)]
struct TrackerEntry {
    version: String,
}

pub(super) fn read_text(path: &Path) -> Result<String, VersioningError> {
    std::fs::read_to_string(path).map_err(|source| VersioningError::IoError {
        path: path.display().to_string(),
        source,
    })
}

/// Extracts the first `.version = "..."` value from the manifest text.
pub(super) fn manifest_version(content: &str) -> Result<Option<String>, VersioningError> {
    let pattern = Regex::new(r#"(?m)^\s*\.version\s*=\s*"([^"]*)""#)?;
    Ok(pattern
        .captures(content)
        .map(|captures| captures[1].trim().to_string()))
}

/// Reads the upstream version recorded by the version-detection tool.
pub(super) fn tracker_version(path: &Path) -> Result<String, VersioningError> {
    let content = read_text(path)?;
    let state: TrackerState =
        serde_json::from_str(&content).map_err(|source| VersioningError::TrackerState {
            path: path.display().to_string(),
            source,
        })?;
    Ok(state.data.upstream.version)
}

/// Extracts the `@v<version>` token from a `# ` title on the first line.
///
/// Returns an empty string when the first line carries no such token.
pub(super) fn readme_header_version(readme: &str) -> Result<String, VersioningError> {
    let pattern = Regex::new(r"^# .*@v([0-9.]*)")?;
    let first_line = readme.lines().next().unwrap_or_default();
    Ok(pattern
        .captures(first_line)
        .map(|captures| captures[1].to_string())
        .unwrap_or_default())
}

/// Collects the versions referenced by `zig fetch --save` install lines.
pub(super) fn readme_install_versions(readme: &str) -> Result<Vec<String>, VersioningError> {
    let pattern = Regex::new(r"^zig fetch --save .*/archive/refs/tags/(.+)\.tar\.gz$")?;
    Ok(readme
        .lines()
        .filter_map(|line| pattern.captures(line.trim_end()))
        .map(|captures| captures[1].to_string())
        .collect())
}
