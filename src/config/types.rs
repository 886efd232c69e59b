//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};

use crate::options::ToolOptions;
use crate::tools::{VIRTUALENV, VIRTUALENV_CLONE};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub packages: PackagesConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
    /// Default options for the environment-creation tool
    #[serde(default)]
    pub virtualenv: ToolOptions,
}

/// Where environments are stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    #[serde(default = "default_envs_path")]
    pub envs_path: String,
}

pub fn default_envs_path() -> String {
    "~/venvs".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            envs_path: default_envs_path(),
        }
    }
}

/// Packages installed into every new environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackagesConfig {
    #[serde(default = "default_packages")]
    pub default: Vec<String>,
    /// Extra flags passed to `pip install`
    #[serde(default)]
    pub installer_flags: Vec<String>,
}

pub fn default_packages() -> Vec<String> {
    vec![crate::SELF_PACKAGE.to_string()]
}

impl Default for PackagesConfig {
    fn default() -> Self {
        Self {
            default: default_packages(),
            installer_flags: Vec::new(),
        }
    }
}

/// Names (or paths) of the external tools
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolsConfig {
    #[serde(default = "default_virtualenv")]
    pub virtualenv: String,
    #[serde(default = "default_clone")]
    pub clone: String,
}

pub fn default_virtualenv() -> String {
    VIRTUALENV.to_string()
}

pub fn default_clone() -> String {
    VIRTUALENV_CLONE.to_string()
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            virtualenv: default_virtualenv(),
            clone: default_clone(),
        }
    }
}
