//! Config subcommands handler

use anyhow::{Context, Result};

use manven::Config;

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show() -> Result<()> {
    let config = Config::load()?;
    let toml_str = toml::to_string_pretty(&config).context("Failed to serialize config")?;
    print!("{toml_str}");
    Ok(())
}

/// Print the config file in use, or where one would be created.
#[cfg(not(tarpaulin_include))]
pub fn handle_path() -> Result<()> {
    match Config::find()? {
        Some(path) => println!("{}", path.display()),
        None => println!("{} (not created, using defaults)", Config::config_path()?.display()),
    }
    Ok(())
}

/// Write the default configuration unless a user config already exists.
#[cfg(not(tarpaulin_include))]
pub fn handle_init() -> Result<()> {
    let config_path = Config::config_path()?;
    if config_path.exists() {
        println!("Config file already exists: {}", config_path.display());
        return Ok(());
    }
    let path = Config::default().save()?;
    println!("Created config file: {}", path.display());
    Ok(())
}
