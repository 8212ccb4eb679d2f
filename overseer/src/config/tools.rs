//! Tool path overrides.

use serde::Deserialize;
use std::path::PathBuf;

/// Optional explicit executable paths from the `[tools]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ToolPaths {
    /// Path to `git`.
    pub git: Option<PathBuf>,

    /// Path to `nvchecker`.
    pub nvchecker: Option<PathBuf>,

    /// Path to `nvcmp`.
    pub nvcmp: Option<PathBuf>,
}
