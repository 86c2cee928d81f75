pub mod container;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use crate::config::{loader, ConfigOverrides};
use crate::docker::{SystemRunner, DEFAULT_DOCKER_BIN};
use crate::lifecycle::ContainerLifecycle;
use crate::notify::{ConsoleNotifier, Notifier, TracingNotifier};

/// Lifecycle adapter as driven from the command line
pub type Session = ContainerLifecycle<SystemRunner, Box<dyn Notifier>>;

#[derive(Parser)]
#[command(name = "guard-docker")]
#[command(version)]
#[command(about = "Start and stop a Docker container alongside a file-watching session", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./guard-docker.yaml, then ~/.guard-docker/config.yaml)
    #[arg(short, long, global = true, env = "GUARD_DOCKER_CONFIG")]
    config: Option<PathBuf>,

    /// Docker executable to invoke
    #[arg(long, global = true, env = "GUARD_DOCKER_BIN", default_value = DEFAULT_DOCKER_BIN)]
    docker: String,

    /// Where status notifications are sent
    #[arg(long, global = true, value_enum, default_value_t = NotifyTarget::Console)]
    notify: NotifyTarget,

    #[command(flatten)]
    container: ContainerArgs,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Values that override the configuration file
#[derive(Args, Debug, Default)]
struct ContainerArgs {
    /// Docker image to run
    #[arg(long, global = true)]
    image: Option<String>,

    /// Image tag
    #[arg(long, global = true)]
    tag: Option<String>,

    /// Host port to publish (requires --container-port)
    #[arg(long, global = true)]
    host_port: Option<u16>,

    /// Container port to publish (requires --host-port)
    #[arg(long, global = true)]
    container_port: Option<u16>,

    /// Set environment variables (format: KEY=VALUE, repeatable)
    #[arg(short, long = "env", global = true, value_name = "KEY=VALUE")]
    env: Vec<String>,
}

impl ContainerArgs {
    fn into_overrides(self) -> Result<ConfigOverrides> {
        Ok(ConfigOverrides {
            image: self.image,
            tag: self.tag,
            host_port: self.host_port,
            container_port: self.container_port,
            env_vars: parse_env_vars(&self.env)?,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum NotifyTarget {
    /// Coloured status lines on stdout
    Console,
    /// Structured log events on stderr
    Log,
}

impl NotifyTarget {
    fn notifier(self) -> Box<dyn Notifier> {
        match self {
            NotifyTarget::Console => Box::new(ConsoleNotifier),
            NotifyTarget::Log => Box::new(TracingNotifier),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Stop any previous container, then start a new one in the background
    Start,

    /// Stop the container
    Stop,

    /// Start the container, wait for Ctrl+C, then stop it
    Up,

    /// Print the docker commands without running them
    Commands {
        /// Output as JSON (for programmatic use)
        #[arg(long)]
        json: bool,
    },

    /// Write a template guard-docker.yaml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let Cli {
            command,
            config,
            docker,
            notify,
            container: container_args,
            ..
        } = self;
        let overrides = container_args.into_overrides()?;

        match command {
            Commands::Init { force } => container::init_config(overrides, force).await,
            Commands::Start => {
                let session = open_session(config.as_deref(), &docker, notify, overrides)?;
                container::start(&session, &docker).await
            }
            Commands::Stop => {
                let session = open_session(config.as_deref(), &docker, notify, overrides)?;
                container::stop(&session).await
            }
            Commands::Up => {
                let session = open_session(config.as_deref(), &docker, notify, overrides)?;
                container::up(&session, &docker).await
            }
            Commands::Commands { json } => {
                let session = open_session(config.as_deref(), &docker, notify, overrides)?;
                container::print_commands(&session, json).await
            }
        }
    }
}

fn open_session(
    config_path: Option<&Path>,
    docker: &str,
    notify: NotifyTarget,
    overrides: ConfigOverrides,
) -> Result<Session> {
    let config = loader::load(config_path)?.with_overrides(overrides);
    Ok(ContainerLifecycle::new(config, SystemRunner, notify.notifier()).with_docker_bin(docker))
}

fn parse_env_vars(env_args: &[String]) -> Result<Vec<(String, String)>> {
    let mut vars = Vec::with_capacity(env_args.len());

    for arg in env_args {
        match arg.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                vars.push((key.to_string(), value.to_string()));
            }
            _ => anyhow::bail!(
                "Invalid environment variable format: {}. Expected KEY=VALUE",
                arg
            ),
        }
    }

    Ok(vars)
}
