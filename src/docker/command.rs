use serde::Serialize;
use std::fmt;

use crate::config::ContainerConfig;
use crate::error::{LifecycleError, Result};

/// Program invoked when none is configured
pub const DEFAULT_DOCKER_BIN: &str = "docker";

/// A docker invocation: the program plus its argument vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DockerCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl DockerCommand {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
        }
    }

    fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl fmt::Display for DockerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Build `docker run --rm [-p H:C] [-e K=V]... --name=<name> <image>[:<tag>]`
pub fn run_command(program: &str, config: &ContainerConfig) -> Result<DockerCommand> {
    let name = config.container_name().ok_or(LifecycleError::MissingImage)?;
    let image = config.image_reference().ok_or(LifecycleError::MissingImage)?;

    let mut cmd = DockerCommand::new(program).arg("run").arg("--rm");

    if let Some(mapping) = config.port_mapping() {
        cmd = cmd.arg("-p").arg(mapping);
    }

    for (key, value) in &config.env_vars {
        cmd = cmd.arg("-e").arg(format!("{}={}", key, value));
    }

    Ok(cmd.arg(format!("--name={}", name)).arg(image))
}

/// Build `docker stop <name>`
pub fn stop_command(program: &str, config: &ContainerConfig) -> Result<DockerCommand> {
    let name = config.container_name().ok_or(LifecycleError::MissingImage)?;
    Ok(DockerCommand::new(program).arg("stop").arg(name))
}
