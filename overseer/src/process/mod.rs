//! External command execution.
//!
//! Every subprocess the scanner starts (version control, version detection)
//! goes through the [`CommandRunner`] trait so validators can be exercised
//! with scripted runners instead of real processes.

mod error;
#[cfg(test)]
pub(crate) mod fake;
mod output;
mod toolchain;

pub use error::ProcessError;
pub use output::CommandOutput;
pub use toolchain::Toolchain;

use std::future::Future;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Runs an external program and captures its result.
pub trait CommandRunner {
    /// Runs `program` with `args` inside `cwd`.
    ///
    /// A non-zero exit is not an error at this level; only failing to start
    /// the process is.
    fn run(
        &self,
        program: &Path,
        args: &[&str],
        cwd: &Path,
    ) -> impl Future<Output = Result<CommandOutput, ProcessError>>;
}

/// [`CommandRunner`] backed by real subprocesses.
///
/// Commands block until they finish; no timeout is applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    async fn run(
        &self,
        program: &Path,
        args: &[&str],
        cwd: &Path,
    ) -> Result<CommandOutput, ProcessError> {
        debug!(command = %describe(program, args), cwd = %cwd.display(), "Running command");

        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| ProcessError::Spawn {
                command: describe(program, args),
                source,
            })?;

        Ok(CommandOutput {
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Runs a command and turns a non-zero exit into [`ProcessError::Failed`].
pub async fn run_checked<R: CommandRunner>(
    runner: &R,
    program: &Path,
    args: &[&str],
    cwd: &Path,
) -> Result<CommandOutput, ProcessError> {
    let output = runner.run(program, args, cwd).await?;
    if !output.success() {
        return Err(ProcessError::Failed {
            command: describe(program, args),
            code: output.code,
            stderr: output.stderr.trim().to_string(),
        });
    }
    Ok(output)
}

/// Formats a command line for logs and error messages.
pub(crate) fn describe(program: &Path, args: &[&str]) -> String {
    let name = program
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_else(|| program.to_string_lossy());
    if args.is_empty() {
        name.into_owned()
    } else {
        format!("{} {}", name, args.join(" "))
    }
}
