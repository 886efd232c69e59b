//! Shell subcommands handler

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use manven::shell::{self, ShellKind};
use manven::StatePaths;

use super::load_manager;

/// Absolute path of the running binary, embedded into the wrapper.
fn current_binary() -> Result<PathBuf> {
    std::env::current_exe().context("Failed to locate the manven binary")
}

/// Print the wrapper for the given (or detected) shell.
#[cfg(not(tarpaulin_include))]
pub fn handle_init(shell_name: Option<&str>, state: &StatePaths) -> Result<()> {
    let kind = match shell_name {
        Some(name) => name.parse::<ShellKind>()?,
        None => ShellKind::detect()?,
    };
    let binary = current_binary()?;
    print!("{}", shell::generate_wrapper(kind, &binary, &state.command_file));
    Ok(())
}

/// Show shell integration status.
#[cfg(not(tarpaulin_include))]
pub fn handle_status(state: &StatePaths) -> Result<()> {
    let manager = load_manager(state)?;
    let status = shell::get_status(manager.shell(), manager.active_environment());
    println!("{}", status.summary());
    Ok(())
}

/// Install the wrapper into .zshrc/.bashrc.
#[cfg(not(tarpaulin_include))]
pub fn handle_install(state: &StatePaths) -> Result<()> {
    let detected = ShellKind::detect()?;
    let rc_file = shell::rc_for_shell(detected)
        .or_else(shell::detect_shell_rc)
        .ok_or_else(|| anyhow!("Could not determine home directory"))?;

    let binary = current_binary()?;
    shell::install(&rc_file, &binary, &state.command_file)
        .with_context(|| format!("Failed to install shell integration into {}", rc_file.display()))?;
    println!("Installed shell integration: {}", rc_file.display());

    println!();
    println!("Shell integration installed successfully.");
    println!("Restart your shell or run: source {}", rc_file.display());
    Ok(())
}

/// Remove the wrapper from .zshrc/.bashrc.
#[cfg(not(tarpaulin_include))]
pub fn handle_uninstall() -> Result<()> {
    let rc_file = match shell::find_installed_rc() {
        Some(rc) => rc,
        None => {
            println!("Shell integration is not installed.");
            return Ok(());
        }
    };

    let removed = shell::uninstall(&rc_file)
        .with_context(|| format!("Failed to remove shell integration from {}", rc_file.display()))?;

    if removed {
        println!("Removed shell integration from: {}", rc_file.display());
        println!();
        println!("Shell integration removed successfully.");
        println!("Restart your shell to complete the removal.");
    } else {
        println!("Shell integration was not found in: {}", rc_file.display());
    }
    Ok(())
}
