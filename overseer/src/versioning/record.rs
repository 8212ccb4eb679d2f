//! Observed version values.

/// Version values read from one working copy.
///
/// Recomputed from the files on every check; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRecord {
    /// `<major>.<minor>.<patch>-<build>` from the package manifest.
    pub manifest_version: String,

    /// Most recent tag reachable from `HEAD`, if any.
    pub tag_version: Option<String>,

    /// `<major>.<minor>.<patch>` recorded by the version-detection tool.
    pub upstream_version: String,

    /// Version embedded in the first documentation line.
    pub readme_header_version: String,

    /// Version referenced by the documented install command.
    pub readme_install_version: String,
}
