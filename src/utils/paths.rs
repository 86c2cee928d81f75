use std::path::PathBuf;

/// Get the guard-docker configuration directory (~/.guard-docker)
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".guard-docker"))
}

/// Get the global config file path, used when no local config exists
pub fn global_config_file() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.yaml"))
}
