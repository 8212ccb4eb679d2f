//! Clone synchronizer.
//!
//! Keeps one shallow working copy per repository under the cache directory
//! and forces it back to the remote default branch on every run.

mod error;
mod working_copy;

pub use error::SyncError;
pub use working_copy::WorkingCopy;

use crate::directory::RepositoryDescriptor;
use crate::process::{run_checked, CommandRunner, ProcessError, Toolchain};
use std::path::{Component, Path};
use tracing::{debug, info_span, Instrument};

/// Ensures `cache_dir/<name>` mirrors the remote default branch.
///
/// An existing copy is fetched, hard-reset to `origin/<default_branch>` and
/// force-cleaned of untracked and ignored files. A missing copy is created
/// with a depth-1 clone of the default branch only. Running this twice
/// against an unchanged remote leaves identical contents.
///
/// # Errors
///
/// Returns [`SyncError`] if the repository name or branch is unusable, the
/// cache directory cannot be created, or any git command fails.
pub async fn sync<R: CommandRunner>(
    runner: &R,
    tools: &Toolchain,
    repository: &RepositoryDescriptor,
    cache_dir: &Path,
) -> Result<WorkingCopy, SyncError> {
    let span = info_span!("sync", repo = %repository.name);

    async {
        validate_name(&repository.name)?;
        validate_branch(repository)?;

        let path = cache_dir.join(&repository.name);
        let git = |source: ProcessError| SyncError::Git {
            repository: repository.name.clone(),
            source,
        };

        if path.exists() {
            debug!("Update cached repository");
            let upstream = format!("origin/{}", repository.default_branch);
            run_checked(runner, tools.git(), &["fetch", "-q", "origin"], &path)
                .await
                .map_err(git)?;
            run_checked(runner, tools.git(), &["reset", "-q", "--hard", &upstream], &path)
                .await
                .map_err(git)?;
            run_checked(runner, tools.git(), &["clean", "-q", "-xd", "--force"], &path)
                .await
                .map_err(git)?;
        } else {
            debug!("Clone repository");
            std::fs::create_dir_all(cache_dir).map_err(|source| SyncError::IoError {
                path: cache_dir.display().to_string(),
                source,
            })?;
            run_checked(
                runner,
                tools.git(),
                &[
                    "clone",
                    "--depth",
                    "1",
                    "--branch",
                    &repository.default_branch,
                    "--",
                    &repository.clone_url,
                    &repository.name,
                ],
                cache_dir,
            )
            .await
            .map_err(git)?;
        }

        Ok(WorkingCopy::new(repository.name.clone(), path))
    }
    .instrument(span)
    .await
}

/// Accepts names that form exactly one normal path component.
fn validate_name(name: &str) -> Result<(), SyncError> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(SyncError::InvalidName {
            name: name.to_string(),
        }),
    }
}

/// Rejects branch names git would read as options.
fn validate_branch(repository: &RepositoryDescriptor) -> Result<(), SyncError> {
    let branch = &repository.default_branch;
    if branch.is_empty() || branch.starts_with('-') {
        return Err(SyncError::InvalidBranch {
            repository: repository.name.clone(),
            branch: branch.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::repository::fixtures::compliant;
    use crate::process::fake::FakeRunner;
    use crate::process::CommandOutput;
    use tempfile::TempDir;

    #[tokio::test]
    async fn clones_missing_copy() {
        let temp = TempDir::new().unwrap();
        let cache_dir = temp.path().join("cache");
        let runner = FakeRunner::succeeding();
        let repo = compliant("zlib");

        let copy = sync(&runner, &Toolchain::default(), &repo, &cache_dir)
            .await
            .unwrap();

        assert_eq!(copy.name(), "zlib");
        assert_eq!(copy.path(), cache_dir.join("zlib"));
        assert!(cache_dir.is_dir());

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].command,
            "git clone --depth 1 --branch main -- https://github.com/zig-devel/zlib.git zlib"
        );
        assert_eq!(calls[0].cwd, cache_dir);
    }

    #[tokio::test]
    async fn resets_existing_copy() {
        let temp = TempDir::new().unwrap();
        let copy_dir = temp.path().join("zlib");
        std::fs::create_dir_all(&copy_dir).unwrap();
        let runner = FakeRunner::succeeding();
        let mut repo = compliant("zlib");
        repo.default_branch = "develop".to_string();

        sync(&runner, &Toolchain::default(), &repo, temp.path())
            .await
            .unwrap();

        assert_eq!(
            runner.commands(),
            [
                "git fetch -q origin",
                "git reset -q --hard origin/develop",
                "git clean -q -xd --force",
            ]
        );
        assert!(runner.calls().iter().all(|call| call.cwd == copy_dir));
    }

    #[tokio::test]
    async fn stops_at_first_failing_command() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("zlib")).unwrap();
        let runner = FakeRunner::new(|call| {
            if call.command.starts_with("git fetch") {
                CommandOutput::failed(128, "fatal: could not read from remote repository")
            } else {
                CommandOutput::ok("")
            }
        });

        let err = sync(
            &runner,
            &Toolchain::default(),
            &compliant("zlib"),
            temp.path(),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            SyncError::Git {
                source: ProcessError::Failed { code: 128, .. },
                ..
            }
        ));
        assert_eq!(runner.commands().len(), 1);
    }

    #[tokio::test]
    async fn rejects_path_like_names() {
        let temp = TempDir::new().unwrap();
        let runner = FakeRunner::succeeding();

        for name in ["../escape", "nested/repo", "..", ""] {
            let repo = compliant(name);
            let result = sync(&runner, &Toolchain::default(), &repo, temp.path()).await;
            assert!(
                matches!(result, Err(SyncError::InvalidName { .. })),
                "{name} should be rejected"
            );
        }
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn rejects_option_like_branch() {
        let temp = TempDir::new().unwrap();
        let runner = FakeRunner::succeeding();
        let mut repo = compliant("zlib");
        repo.default_branch = "--upload-pack=evil".to_string();

        let result = sync(&runner, &Toolchain::default(), &repo, temp.path()).await;

        assert!(matches!(result, Err(SyncError::InvalidBranch { .. })));
        assert!(runner.calls().is_empty());
    }
}
