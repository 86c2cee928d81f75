use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::config::container::ContainerConfig;
use crate::utils::paths;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "guard-docker.yaml";

/// Pick the configuration file to load.
///
/// An explicit path must exist. Otherwise the working directory is tried,
/// then the user's global config. `None` means run from flags alone.
pub fn resolve_config_path(
    explicit: Option<&Path>,
    cwd: &Path,
    global: Option<PathBuf>,
) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        return Ok(Some(path.to_path_buf()));
    }

    let local = cwd.join(CONFIG_FILE_NAME);
    if local.is_file() {
        return Ok(Some(local));
    }

    Ok(global.filter(|path| path.is_file()))
}

/// Load the configuration for this invocation
pub fn load(explicit: Option<&Path>) -> Result<ContainerConfig> {
    let cwd = std::env::current_dir()?;
    match resolve_config_path(explicit, &cwd, paths::global_config_file())? {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            ContainerConfig::load(&path)
        }
        None => {
            tracing::debug!("No config file found, using command line values only");
            Ok(ContainerConfig::default())
        }
    }
}
