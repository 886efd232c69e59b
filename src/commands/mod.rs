//! Command handlers for the manven CLI.
//!
//! Each submodule handles a specific CLI command or command group.
//! The main dispatch logic remains in main.rs.

pub mod completions;
pub mod config;
pub mod env;
pub mod get;
pub mod shell;

use anyhow::Result;

use manven::cli::SourceArgs;
use manven::options::ToolOptions;
use manven::{Config, CreateOptions, EnvironmentManager, Settings, StatePaths, SELF_PACKAGE};

/// Load the config and build a manager for the invoking shell.
pub fn load_manager(state: &StatePaths) -> Result<EnvironmentManager> {
    let settings = Config::load()?.settings()?;
    Ok(EnvironmentManager::from_env(settings, state.clone())?)
}

/// Combine configured defaults with command-line flags.
pub fn create_options(
    settings: &Settings,
    replace: bool,
    source: &SourceArgs,
    tool: ToolOptions,
) -> CreateOptions {
    let mut options = CreateOptions::from_settings(settings);
    options.replace = replace;
    options.clone_from = source.clone.clone();
    options.tool = settings.tool_options.merged_with(&tool);
    if source.no_packages {
        options.packages.clear();
    } else if source.no_manven {
        options.packages.retain(|p| p != SELF_PACKAGE);
    }
    options
}
