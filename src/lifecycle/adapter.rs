use std::path::PathBuf;

use super::{Lifecycle, PathChange};
use crate::config::ContainerConfig;
use crate::docker::{self, CommandRunner, CommandStatus, DockerCommand, DEFAULT_DOCKER_BIN};
use crate::error::{LifecycleError, Result};
use crate::notify::{Notifier, Severity};

/// Starts and stops the single container described by a [`ContainerConfig`].
///
/// Start always stops first, so at most one container per configuration is
/// ever running. The container is addressed only by its derived name.
pub struct ContainerLifecycle<R, N> {
    config: ContainerConfig,
    docker_bin: String,
    runner: R,
    notifier: N,
}

impl<R: CommandRunner, N: Notifier> ContainerLifecycle<R, N> {
    pub fn new(config: ContainerConfig, runner: R, notifier: N) -> Self {
        Self {
            config,
            docker_bin: DEFAULT_DOCKER_BIN.to_string(),
            runner,
            notifier,
        }
    }

    /// Use a different docker executable
    pub fn with_docker_bin(mut self, docker_bin: impl Into<String>) -> Self {
        self.docker_bin = docker_bin.into();
        self
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    pub fn run_command(&self) -> Result<DockerCommand> {
        docker::run_command(&self.docker_bin, &self.config)
    }

    pub fn stop_command(&self) -> Result<DockerCommand> {
        docker::stop_command(&self.docker_bin, &self.config)
    }
}

impl<R: CommandRunner, N: Notifier> Lifecycle for ContainerLifecycle<R, N> {
    fn start(&self) -> Result<String> {
        let Some(image) = self.config.image.as_deref() else {
            let err = LifecycleError::MissingImage;
            self.notifier.notify(&err.to_string(), Severity::Failed);
            return Err(err);
        };
        let run = self.run_command()?;

        // Exit status is irrelevant here; a missing container is the usual case.
        if let Err(err) = self.stop() {
            tracing::warn!("Stop before start failed: {}", err);
        }

        if let Some(reference) = self.config.image_reference() {
            self.notifier
                .notify(&format!("Starting {}", reference), Severity::Pending);
        }

        if let Err(source) = self.runner.spawn_detached(&run) {
            let err = LifecycleError::Spawn {
                command: run.to_string(),
                source,
            };
            self.notifier
                .notify(&format!("Failed to start {}: {}", image, err), Severity::Failed);
            return Err(err);
        }

        let message = format!("{} is running", image);
        self.notifier.notify(&message, Severity::Success);
        Ok(message)
    }

    fn stop(&self) -> Result<CommandStatus> {
        let cmd = self.stop_command()?;
        let status = self
            .runner
            .run(&cmd)
            .map_err(|source| LifecycleError::Spawn {
                command: cmd.to_string(),
                source,
            })?;

        if !status.success() {
            tracing::debug!("`{}` exited with {:?}", cmd, status.code);
        }
        Ok(status)
    }

    fn reload(&self) -> Result<()> {
        tracing::trace!("reload: nothing to do");
        Ok(())
    }

    fn run_all(&self) -> Result<()> {
        tracing::trace!("run_all: nothing to do");
        Ok(())
    }

    fn on_paths_changed(&self, change: PathChange, paths: &[PathBuf]) -> Result<()> {
        tracing::trace!("{} {} path(s): nothing to do", change, paths.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io;

    #[derive(Default)]
    struct FakeRunner {
        calls: RefCell<Vec<String>>,
        stop_code: i32,
        fail_spawn: bool,
    }

    impl CommandRunner for &FakeRunner {
        fn spawn_detached(&self, cmd: &DockerCommand) -> io::Result<()> {
            self.calls.borrow_mut().push(format!("spawn {}", cmd));
            if self.fail_spawn {
                return Err(io::Error::new(io::ErrorKind::NotFound, "docker not found"));
            }
            Ok(())
        }

        fn run(&self, cmd: &DockerCommand) -> io::Result<CommandStatus> {
            self.calls.borrow_mut().push(format!("run {}", cmd));
            Ok(CommandStatus::from_code(self.stop_code))
        }
    }

    #[derive(Default)]
    struct FakeNotifier(RefCell<Vec<(String, Severity)>>);

    impl Notifier for &FakeNotifier {
        fn notify(&self, message: &str, severity: Severity) {
            self.0.borrow_mut().push((message.to_string(), severity));
        }
    }

    fn redis() -> ContainerConfig {
        ContainerConfig {
            image: Some("redis".to_string()),
            host_port: Some(6379),
            container_port: Some(6379),
            ..Default::default()
        }
    }

    #[test]
    fn start_stops_then_spawns() {
        let runner = FakeRunner::default();
        let notifier = FakeNotifier::default();
        let lifecycle = ContainerLifecycle::new(redis(), &runner, &notifier);

        let message = lifecycle.start().unwrap();

        assert_eq!(message, "redis is running");
        assert_eq!(
            *runner.calls.borrow(),
            vec![
                "run docker stop guard-redis".to_string(),
                "spawn docker run --rm -p 6379:6379 --name=guard-redis redis".to_string(),
            ]
        );
        assert_eq!(
            *notifier.0.borrow(),
            vec![
                ("Starting redis".to_string(), Severity::Pending),
                ("redis is running".to_string(), Severity::Success),
            ]
        );
    }

    #[test]
    fn start_without_image_spawns_nothing() {
        let runner = FakeRunner::default();
        let notifier = FakeNotifier::default();
        let lifecycle = ContainerLifecycle::new(ContainerConfig::default(), &runner, &notifier);

        let err = lifecycle.start().unwrap_err();

        assert!(matches!(err, LifecycleError::MissingImage));
        assert!(runner.calls.borrow().is_empty());
        assert_eq!(
            *notifier.0.borrow(),
            vec![("You must specify an image".to_string(), Severity::Failed)]
        );
    }

    #[test]
    fn failing_stop_does_not_block_start() {
        let runner = FakeRunner {
            stop_code: 1,
            ..Default::default()
        };
        let notifier = FakeNotifier::default();
        let lifecycle = ContainerLifecycle::new(redis(), &runner, &notifier);

        assert!(lifecycle.start().is_ok());
        assert_eq!(runner.calls.borrow().len(), 2);
    }

    #[test]
    fn stop_returns_nonzero_status_as_ok() {
        let runner = FakeRunner {
            stop_code: 1,
            ..Default::default()
        };
        let notifier = FakeNotifier::default();
        let lifecycle = ContainerLifecycle::new(redis(), &runner, &notifier);

        let status = lifecycle.stop().unwrap();

        assert_eq!(status.code, Some(1));
        assert!(notifier.0.borrow().is_empty());
    }

    #[test]
    fn stop_without_image_is_silent() {
        let runner = FakeRunner::default();
        let notifier = FakeNotifier::default();
        let lifecycle = ContainerLifecycle::new(ContainerConfig::default(), &runner, &notifier);

        let err = lifecycle.stop().unwrap_err();

        assert!(matches!(err, LifecycleError::MissingImage));
        assert!(runner.calls.borrow().is_empty());
        assert!(notifier.0.borrow().is_empty());
    }

    #[test]
    fn spawn_failure_is_reported() {
        let runner = FakeRunner {
            fail_spawn: true,
            ..Default::default()
        };
        let notifier = FakeNotifier::default();
        let lifecycle = ContainerLifecycle::new(redis(), &runner, &notifier);

        let err = lifecycle.start().unwrap_err();

        assert!(matches!(err, LifecycleError::Spawn { .. }));
        let notes = notifier.0.borrow();
        let (message, severity) = notes.last().unwrap();
        assert_eq!(*severity, Severity::Failed);
        assert!(message.starts_with("Failed to start redis"));
    }

    #[test]
    fn custom_docker_bin_is_used() {
        let runner = FakeRunner::default();
        let notifier = FakeNotifier::default();
        let lifecycle =
            ContainerLifecycle::new(redis(), &runner, &notifier).with_docker_bin("podman");

        lifecycle.stop().unwrap();

        assert_eq!(*runner.calls.borrow(), vec!["run podman stop guard-redis".to_string()]);
    }

    #[test]
    fn watch_callbacks_are_noops() {
        let runner = FakeRunner::default();
        let notifier = FakeNotifier::default();
        let lifecycle = ContainerLifecycle::new(redis(), &runner, &notifier);

        lifecycle.reload().unwrap();
        lifecycle.run_all().unwrap();
        for change in [PathChange::Added, PathChange::Modified, PathChange::Removed] {
            lifecycle
                .on_paths_changed(change, &[PathBuf::from("src/main.rs")])
                .unwrap();
        }

        assert!(runner.calls.borrow().is_empty());
        assert!(notifier.0.borrow().is_empty());
    }
}
