//! `get` subcommand handlers

use anyhow::Result;

use manven::{Config, StatePaths};

use super::load_manager;

/// Print the store root.
#[cfg(not(tarpaulin_include))]
pub fn handle_path() -> Result<()> {
    let settings = Config::load()?.settings()?;
    println!("{}", settings.store_root.display());
    Ok(())
}

/// Print the pending-command file. Also used by the post-install self-check.
#[cfg(not(tarpaulin_include))]
pub fn handle_command_file(state: &StatePaths) -> Result<()> {
    println!("{}", state.command_file.display());
    Ok(())
}

#[cfg(not(tarpaulin_include))]
pub fn handle_active(state: &StatePaths) -> Result<()> {
    let manager = load_manager(state)?;
    if let Some(name) = manager.active_environment() {
        println!("{name}");
    }
    Ok(())
}
