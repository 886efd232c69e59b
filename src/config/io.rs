//! Configuration I/O operations

use std::fs;
use std::path::{Path, PathBuf};

use super::types::Config;
use crate::error::{at, ManvenError, Result};

/// File name of the user config inside the config directory
pub const CONFIG_FILE_NAME: &str = "manven.toml";

/// File name of a config placed in the working directory or home directory
pub const LOCAL_CONFIG_FILE_NAME: &str = ".manven.toml";

/// Get the config directory path (~/.config/manven)
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ManvenError::Config("Could not determine home directory".to_string()))?;
    Ok(home.join(".config").join("manven"))
}

/// Get the config file path (~/.config/manven/manven.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Config files in lookup order; the first one that exists wins.
pub fn candidate_paths() -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(LOCAL_CONFIG_FILE_NAME));
    }
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(LOCAL_CONFIG_FILE_NAME));
    }
    paths.push(config_path()?);
    Ok(paths)
}

/// The config file that [`load`] reads, if any.
pub fn find_config() -> Result<Option<PathBuf>> {
    Ok(candidate_paths()?.into_iter().find(|p| p.is_file()))
}

/// Load configuration from the first config file found, or return defaults
pub fn load() -> Result<Config> {
    match find_config()? {
        Some(path) => load_from(&path),
        None => Ok(Config::default()),
    }
}

/// Load and validate a specific config file
pub fn load_from(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path).map_err(at(path))?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| ManvenError::Config(format!("{}: {}", path.display(), e)))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Save configuration to the user config file
pub fn save(config: &Config) -> Result<PathBuf> {
    let path = config_path()?;
    save_to(config, &path)?;
    Ok(path)
}

/// Save configuration to `path`, creating its directory
pub fn save_to(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(at(parent))?;
    }
    let contents = toml::to_string_pretty(config)
        .map_err(|e| ManvenError::Config(format!("Failed to serialize config: {}", e)))?;
    fs::write(path, contents).map_err(at(path))
}
