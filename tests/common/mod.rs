//! Recording doubles for the runner and notifier seams.

#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use guard_docker::docker::{CommandRunner, CommandStatus, DockerCommand};
use guard_docker::notify::{Notifier, Severity};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Detached(DockerCommand),
    Blocking(DockerCommand),
}

impl Call {
    pub fn command(&self) -> &DockerCommand {
        match self {
            Call::Detached(cmd) | Call::Blocking(cmd) => cmd,
        }
    }
}

#[derive(Clone, Default)]
pub struct RecordingRunner {
    calls: Arc<Mutex<Vec<Call>>>,
    exit_code: i32,
}

impl RecordingRunner {
    pub fn with_exit_code(exit_code: i32) -> Self {
        Self {
            exit_code,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn spawn_detached(&self, cmd: &DockerCommand) -> io::Result<()> {
        self.calls.lock().unwrap().push(Call::Detached(cmd.clone()));
        Ok(())
    }

    fn run(&self, cmd: &DockerCommand) -> io::Result<CommandStatus> {
        self.calls.lock().unwrap().push(Call::Blocking(cmd.clone()));
        Ok(CommandStatus::from_code(self.exit_code))
    }
}

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    notes: Arc<Mutex<Vec<(String, Severity)>>>,
}

impl RecordingNotifier {
    pub fn notes(&self) -> Vec<(String, Severity)> {
        self.notes.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        self.notes
            .lock()
            .unwrap()
            .push((message.to_string(), severity));
    }
}
