//! Environment lifecycle command handlers

use anyhow::{Context, Result};

use manven::cli::{EnvArgs, TempArgs};
use manven::{CreateOutcome, StatePaths};

use super::{create_options, load_manager};

/// Create the environment if needed, then activate it.
#[cfg(not(tarpaulin_include))]
pub fn handle_activate(args: &EnvArgs, state: &StatePaths) -> Result<()> {
    let manager = load_manager(state)?;
    let options = create_options(
        manager.settings(),
        args.new,
        &args.source,
        args.tool.to_options(),
    );
    let outcome = manager.create(&args.name, &options)?;
    report_outcome(&args.name, outcome);
    manager.activate(&args.name)?;
    Ok(())
}

#[cfg(not(tarpaulin_include))]
pub fn handle_create(args: &EnvArgs, state: &StatePaths) -> Result<()> {
    let manager = load_manager(state)?;
    let options = create_options(
        manager.settings(),
        args.new,
        &args.source,
        args.tool.to_options(),
    );
    let outcome = manager.create(&args.name, &options)?;
    report_outcome(&args.name, outcome);
    Ok(())
}

fn report_outcome(name: &str, outcome: CreateOutcome) {
    match outcome {
        CreateOutcome::Created => eprintln!("Created environment {name}"),
        CreateOutcome::Cloned => eprintln!("Cloned environment {name}"),
        CreateOutcome::Replaced => eprintln!("Replaced environment {name}"),
        CreateOutcome::Kept => {}
    }
}

#[cfg(not(tarpaulin_include))]
pub fn handle_deactivate(state: &StatePaths) -> Result<()> {
    let manager = load_manager(state)?;
    manager.deactivate()?;
    Ok(())
}

#[cfg(not(tarpaulin_include))]
pub fn handle_remove(name: &str, state: &StatePaths) -> Result<()> {
    let manager = load_manager(state)?;
    if manager.remove(name)? {
        eprintln!("Removed environment {name}");
    }
    Ok(())
}

/// Print one environment name per line.
#[cfg(not(tarpaulin_include))]
pub fn handle_list(include_temporary: bool, state: &StatePaths) -> Result<()> {
    let manager = load_manager(state)?;
    let names = manager
        .list(include_temporary)
        .with_context(|| format!("Failed to list {}", manager.store_root().display()))?;
    for name in names {
        println!("{name}");
    }
    Ok(())
}

#[cfg(not(tarpaulin_include))]
pub fn handle_temp(args: &TempArgs, state: &StatePaths) -> Result<()> {
    let manager = load_manager(state)?;
    let options = create_options(
        manager.settings(),
        false,
        &args.source,
        args.tool.to_options(),
    );
    let name = manager.activate_temp(&options)?;
    eprintln!("Created temporary environment {name}");
    Ok(())
}

#[cfg(not(tarpaulin_include))]
pub fn handle_prune(state: &StatePaths) -> Result<()> {
    let manager = load_manager(state)?;
    let removed = manager.prune_temp()?;
    match removed.len() {
        0 => eprintln!("No temporary environments to prune"),
        1 => eprintln!("Pruned 1 temporary environment"),
        n => eprintln!("Pruned {n} temporary environments"),
    }
    Ok(())
}

#[cfg(not(tarpaulin_include))]
pub fn handle_last(state: &StatePaths) -> Result<()> {
    let manager = load_manager(state)?;
    if manager.open_last()?.is_none() {
        println!("No environment has been activated yet");
    }
    Ok(())
}
