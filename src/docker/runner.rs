use anyhow::{Context, Result};
use std::io;
use std::path::PathBuf;
use std::process::Command;

use super::command::DockerCommand;

/// Exit status of a docker invocation that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    /// `None` when the process was terminated by a signal
    pub code: Option<i32>,
}

impl CommandStatus {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for CommandStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

/// Executes docker command lines on behalf of the lifecycle adapter.
pub trait CommandRunner {
    /// Launch the command and return as soon as it is spawned.
    fn spawn_detached(&self, cmd: &DockerCommand) -> io::Result<()>;

    /// Run the command and block until it exits.
    fn run(&self, cmd: &DockerCommand) -> io::Result<CommandStatus>;
}

/// Runs commands as real child processes, inheriting stdio.
///
/// Arguments go straight to the program, not through a shell: `$VAR` in an
/// env value is not expanded and values containing spaces are not split.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn spawn_detached(&self, cmd: &DockerCommand) -> io::Result<()> {
        tracing::debug!("Spawning: {}", cmd);
        let child = Command::new(&cmd.program).args(&cmd.args).spawn()?;
        tracing::debug!("Spawned pid {}", child.id());
        Ok(())
    }

    fn run(&self, cmd: &DockerCommand) -> io::Result<CommandStatus> {
        tracing::debug!("Running: {}", cmd);
        let status = Command::new(&cmd.program).args(&cmd.args).status()?;
        Ok(status.into())
    }
}

/// Verify that the docker executable can be found.
pub fn ensure_available(program: &str) -> Result<PathBuf> {
    which::which(program).with_context(|| {
        format!(
            "Could not find `{}`. Is Docker installed and on PATH?",
            program
        )
    })
}
