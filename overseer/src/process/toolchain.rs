//! Resolved locations of the external tools the scanner drives.

use crate::config::ToolPaths;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const GIT: &str = "git";
const NVCHECKER: &str = "nvchecker";
const NVCMP: &str = "nvcmp";

/// Executable paths for every external tool, resolved once at startup.
///
/// Components receive this struct instead of looking tools up themselves,
/// so tests can point them at stand-in executables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    git: PathBuf,
    nvchecker: PathBuf,
    nvcmp: PathBuf,
}

impl Toolchain {
    /// Creates a toolchain from explicit paths.
    pub fn new(
        git: impl Into<PathBuf>,
        nvchecker: impl Into<PathBuf>,
        nvcmp: impl Into<PathBuf>,
    ) -> Self {
        Self {
            git: git.into(),
            nvchecker: nvchecker.into(),
            nvcmp: nvcmp.into(),
        }
    }

    /// Resolves every tool, preferring configured paths.
    ///
    /// Tools without a configured path are searched on `PATH` and then next
    /// to the running executable. Unresolved tools keep their bare name and
    /// fail when first invoked.
    pub fn resolve(paths: &ToolPaths) -> Self {
        Self {
            git: paths.git.clone().unwrap_or_else(|| locate(GIT)),
            nvchecker: paths.nvchecker.clone().unwrap_or_else(|| locate(NVCHECKER)),
            nvcmp: paths.nvcmp.clone().unwrap_or_else(|| locate(NVCMP)),
        }
    }

    /// Returns the `git` executable.
    pub fn git(&self) -> &Path {
        &self.git
    }

    /// Returns the `nvchecker` executable.
    pub fn nvchecker(&self) -> &Path {
        &self.nvchecker
    }

    /// Returns the `nvcmp` executable.
    pub fn nvcmp(&self) -> &Path {
        &self.nvcmp
    }
}

impl Default for Toolchain {
    fn default() -> Self {
        Self::new(GIT, NVCHECKER, NVCMP)
    }
}

fn locate(name: &str) -> PathBuf {
    if let Ok(path) = which::which(name) {
        debug!(tool = name, path = %path.display(), "Resolved tool on PATH");
        return path;
    }

    if let Some(path) = sibling_of_current_exe(name) {
        debug!(tool = name, path = %path.display(), "Resolved tool next to executable");
        return path;
    }

    warn!(tool = name, "Tool not found, relying on lookup at invocation");
    PathBuf::from(name)
}

fn sibling_of_current_exe(name: &str) -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    // Installers may expose the binary through a symlink.
    let exe = exe.canonicalize().unwrap_or(exe);
    let candidate = exe.parent()?.join(name);
    candidate.is_file().then_some(candidate)
}
