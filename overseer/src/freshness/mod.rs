//! Upstream freshness check.
//!
//! Delegates upstream version detection to `nvchecker` and `nvcmp`, using the
//! configuration file each package keeps at its root.

mod error;

pub use error::FreshnessError;

use crate::process::{run_checked, CommandRunner, ProcessError, Toolchain};
use crate::sync::WorkingCopy;
use tracing::{debug, info};

/// Path of the version-detection configuration inside a working copy.
pub const NVCHECKER_CONFIG: &str = ".nvchecker.toml";

/// Whether the tracked upstream version is still the newest one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Freshness {
    /// No newer upstream release.
    Fresh,
    /// Upstream released something newer.
    Outdated {
        /// Raw `nvcmp` output describing the change.
        details: String,
    },
}

/// Checks whether the package in `working_copy` tracks the latest upstream.
///
/// Runs `nvchecker` to refresh the tool's state, then `nvcmp` to diff it
/// against the recorded version. Any `nvcmp` output means upstream moved.
///
/// # Errors
///
/// Returns [`FreshnessError`] if either tool cannot be run or fails.
pub async fn check_fresh<R: CommandRunner>(
    runner: &R,
    tools: &Toolchain,
    working_copy: &WorkingCopy,
) -> Result<Freshness, FreshnessError> {
    let tool = |source: ProcessError| FreshnessError::Tool {
        repository: working_copy.name().to_string(),
        source,
    };
    let args = ["-c", NVCHECKER_CONFIG];

    let refresh = run_checked(runner, tools.nvchecker(), &args, working_copy.path())
        .await
        .map_err(tool)?;
    // nvchecker reports progress on stderr.
    if !refresh.stderr.trim().is_empty() {
        debug!(output = %refresh.stderr.trim(), "nvchecker");
    }

    let diff = run_checked(runner, tools.nvcmp(), &args, working_copy.path())
        .await
        .map_err(tool)?;
    let details = diff.stdout.trim();

    if details.is_empty() {
        debug!(repo = %working_copy.name(), "Upstream unchanged");
        Ok(Freshness::Fresh)
    } else {
        info!(repo = %working_copy.name(), details, "Upstream has a new version");
        Ok(Freshness::Outdated {
            details: details.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::fake::FakeRunner;
    use crate::process::CommandOutput;
    use std::path::Path;

    fn working_copy() -> WorkingCopy {
        WorkingCopy::new("zlib", "/cache/zlib")
    }

    #[tokio::test]
    async fn empty_diff_is_fresh() {
        let runner = FakeRunner::succeeding();

        let result = check_fresh(&runner, &Toolchain::default(), &working_copy())
            .await
            .unwrap();

        assert_eq!(result, Freshness::Fresh);
        assert_eq!(
            runner.commands(),
            ["nvchecker -c .nvchecker.toml", "nvcmp -c .nvchecker.toml"]
        );
        assert!(runner
            .calls()
            .iter()
            .all(|call| call.cwd == Path::new("/cache/zlib")));
    }

    #[tokio::test]
    async fn non_empty_diff_is_outdated() {
        let runner = FakeRunner::new(|call| {
            if call.command.starts_with("nvcmp") {
                CommandOutput::ok("upstream 1.3.0 -> 1.3.1\n")
            } else {
                CommandOutput::ok("")
            }
        });

        let result = check_fresh(&runner, &Toolchain::default(), &working_copy())
            .await
            .unwrap();

        assert_eq!(
            result,
            Freshness::Outdated {
                details: "upstream 1.3.0 -> 1.3.1".to_string()
            }
        );
    }

    #[tokio::test]
    async fn failing_refresh_skips_diff() {
        let runner = FakeRunner::new(|_| CommandOutput::failed(1, "network unreachable"));

        let result = check_fresh(&runner, &Toolchain::default(), &working_copy()).await;

        assert!(matches!(result, Err(FreshnessError::Tool { .. })));
        assert_eq!(runner.commands(), ["nvchecker -c .nvchecker.toml"]);
    }

    #[tokio::test]
    async fn uses_configured_tool_paths() {
        let runner = FakeRunner::succeeding();
        let tools = Toolchain::new("git", "/opt/nv/nvchecker", "/opt/nv/nvcmp");

        check_fresh(&runner, &tools, &working_copy()).await.unwrap();

        let programs: Vec<_> = runner.calls().into_iter().map(|call| call.program).collect();
        assert_eq!(
            programs,
            [Path::new("/opt/nv/nvchecker"), Path::new("/opt/nv/nvcmp")]
        );
    }
}
