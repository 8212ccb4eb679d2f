//! Scripted [`CommandRunner`] for unit tests.

use super::{describe, CommandOutput, CommandRunner, ProcessError};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A recorded command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Invocation {
    pub(crate) program: PathBuf,
    pub(crate) command: String,
    pub(crate) cwd: PathBuf,
}

type Responder = Box<dyn Fn(&Invocation) -> CommandOutput + Send + Sync>;

/// Answers every command through a closure and records what was run.
pub(crate) struct FakeRunner {
    respond: Responder,
    calls: Mutex<Vec<Invocation>>,
}

impl FakeRunner {
    pub(crate) fn new(
        respond: impl Fn(&Invocation) -> CommandOutput + Send + Sync + 'static,
    ) -> Self {
        Self {
            respond: Box::new(respond),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A runner where every command succeeds with empty output.
    pub(crate) fn succeeding() -> Self {
        Self::new(|_| CommandOutput::ok(""))
    }

    pub(crate) fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn commands(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.command).collect()
    }
}

impl CommandRunner for FakeRunner {
    async fn run(
        &self,
        program: &Path,
        args: &[&str],
        cwd: &Path,
    ) -> Result<CommandOutput, ProcessError> {
        let invocation = Invocation {
            program: program.to_path_buf(),
            command: describe(program, args),
            cwd: cwd.to_path_buf(),
        };
        let output = (self.respond)(&invocation);
        self.calls.lock().unwrap().push(invocation);
        Ok(output)
    }
}
