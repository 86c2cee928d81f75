// Docker command lines and the processes that run them.

pub mod command;
pub mod runner;

pub use command::{run_command, stop_command, DockerCommand, DEFAULT_DOCKER_BIN};
pub use runner::{ensure_available, CommandRunner, CommandStatus, SystemRunner};
