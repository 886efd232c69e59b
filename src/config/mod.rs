//! Configuration management for manven
//!
//! The config file is read once at startup and resolved into an immutable
//! [`Settings`] value that is handed to the environment manager.

mod io;
mod types;

pub use io::{candidate_paths, CONFIG_FILE_NAME, LOCAL_CONFIG_FILE_NAME};
pub use types::*;

use std::path::{Path, PathBuf};

use crate::error::{ManvenError, Result};
use crate::options::ToolOptions;

/// File (inside the state directory) holding the pending shell command
pub const COMMAND_FILE_NAME: &str = "to_execute.sh";

/// File (inside the state directory) holding the last-activated record
pub const LAST_ACTIVATED_FILE_NAME: &str = "last_activated";

impl Config {
    /// Get the config file path (~/.config/manven/manven.toml)
    pub fn config_path() -> Result<PathBuf> {
        io::config_path()
    }

    /// Get the config directory path (~/.config/manven)
    pub fn config_dir() -> Result<PathBuf> {
        io::config_dir()
    }

    /// The config file [`Config::load`] would read, if one exists
    pub fn find() -> Result<Option<PathBuf>> {
        io::find_config()
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Result<Self> {
        io::load()
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        io::load_from(path)
    }

    /// Save configuration to the user config file, returning its path
    pub fn save(&self) -> Result<PathBuf> {
        io::save(self)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        io::save_to(self, path)
    }

    /// Expand `~` in the store path
    pub fn storage_directory(&self) -> PathBuf {
        let dir = &self.storage.envs_path;
        if dir == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
        if let Some(stripped) = dir.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        }
        PathBuf::from(dir)
    }

    /// Check the values that cannot be expressed in the schema.
    pub fn validate(&self) -> Result<()> {
        if self.storage.envs_path.trim().is_empty() {
            return Err(ManvenError::Config(
                "storage.envs_path must not be empty".to_string(),
            ));
        }
        if self.packages.default.iter().any(|p| p.trim().is_empty()) {
            return Err(ManvenError::Config(
                "packages.default must not contain empty package names".to_string(),
            ));
        }
        if self.tools.virtualenv.trim().is_empty() || self.tools.clone.trim().is_empty() {
            return Err(ManvenError::Config(
                "tools.virtualenv and tools.clone must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate and resolve into the settings the manager runs with.
    pub fn settings(&self) -> Result<Settings> {
        self.validate()?;

        let mut store_root = self.storage_directory();
        if store_root.is_relative() {
            let cwd = std::env::current_dir().map_err(|e| ManvenError::io(&store_root, e))?;
            store_root = cwd.join(store_root);
        }

        Ok(Settings {
            store_root,
            default_packages: self.packages.default.clone(),
            installer_flags: self.packages.installer_flags.clone(),
            tools: self.tools.clone(),
            tool_options: self.virtualenv.clone(),
        })
    }
}

/// Resolved, immutable settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Absolute directory holding the named environments
    pub store_root: PathBuf,
    pub default_packages: Vec<String>,
    pub installer_flags: Vec<String>,
    pub tools: ToolsConfig,
    pub tool_options: ToolOptions,
}

impl Settings {
    /// Settings with the given store and no default packages.
    pub fn new(store_root: impl Into<PathBuf>) -> Self {
        Self {
            store_root: store_root.into(),
            default_packages: Vec::new(),
            installer_flags: Vec::new(),
            tools: ToolsConfig::default(),
            tool_options: ToolOptions::default(),
        }
    }

    pub fn with_default_packages<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_packages = packages.into_iter().map(Into::into).collect();
        self
    }
}

/// Locations of the files manven keeps between invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatePaths {
    pub command_file: PathBuf,
    pub last_activated: PathBuf,
}

impl StatePaths {
    /// State files inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            command_file: dir.join(COMMAND_FILE_NAME),
            last_activated: dir.join(LAST_ACTIVATED_FILE_NAME),
        }
    }

    /// State files in the config directory (~/.config/manven).
    pub fn default_location() -> Result<Self> {
        Ok(Self::in_dir(&Config::config_dir()?))
    }
}
