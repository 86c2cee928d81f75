use anyhow::{Context, Result};
use colored::Colorize;

use super::Session;
use crate::config::{loader::CONFIG_FILE_NAME, ConfigOverrides, ContainerConfig};
use crate::docker;
use crate::lifecycle::Lifecycle;

/// Image written by `init` when none is given
const TEMPLATE_IMAGE: &str = "nginx";

/// Check docker is reachable before a start. Without an image the lifecycle
/// reports the configuration error itself.
fn preflight(session: &Session, docker_bin: &str) -> Result<()> {
    if session.config().image.is_some() {
        let path = docker::ensure_available(docker_bin)?;
        tracing::debug!("Using docker at {}", path.display());
    }
    Ok(())
}

pub async fn start(session: &Session, docker_bin: &str) -> Result<()> {
    preflight(session, docker_bin)?;
    let message = session.start()?;
    tracing::debug!("{}", message);
    Ok(())
}

pub async fn stop(session: &Session) -> Result<()> {
    let status = session.stop()?;
    match status.code {
        Some(0) => tracing::info!("Stopped {}", session.config().container_name().unwrap_or_default()),
        Some(code) => tracing::debug!("docker stop exited with code {}", code),
        None => tracing::debug!("docker stop was terminated by a signal"),
    }
    Ok(())
}

pub async fn up(session: &Session, docker_bin: &str) -> Result<()> {
    start(session, docker_bin).await?;

    println!("  Press Ctrl+C to stop\n");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;

    tracing::info!("Shutting down");
    stop(session).await
}

pub async fn print_commands(session: &Session, json: bool) -> Result<()> {
    let run = session
        .run_command()
        .context("Cannot build the docker run command")?;
    let stop = session
        .stop_command()
        .context("Cannot build the docker stop command")?;

    if json {
        let output = serde_json::json!({
            "container_name": session.config().container_name(),
            "run": run,
            "stop": stop,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}  {}", "run:".bold(), run);
        println!("{} {}", "stop:".bold(), stop);
    }

    Ok(())
}

pub async fn init_config(overrides: ConfigOverrides, force: bool) -> Result<()> {
    let path = std::env::current_dir()?.join(CONFIG_FILE_NAME);
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            path.display()
        );
    }

    let image = overrides
        .image
        .clone()
        .unwrap_or_else(|| TEMPLATE_IMAGE.to_string());
    let config = ContainerConfig::template(&image).with_overrides(overrides);

    std::fs::write(&path, config.to_yaml()?)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    println!("{} Created {}", "✓".green().bold(), path.display());
    Ok(())
}
