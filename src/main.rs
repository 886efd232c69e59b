//! manven - CLI entry point

mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use manven::cli::{Cli, Commands, ConfigCommands, GetCommands, ShellCommands};
use manven::{CommandRelay, StatePaths};

/// Environment variable holding the log filter (e.g. `MANVEN_LOG=debug`)
const LOG_ENV_VAR: &str = "MANVEN_LOG";

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("manven=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

/// Printed on stderr the first time manven runs for a user.
fn print_first_usage_notice() {
    eprintln!(
        "It looks like it's the first time you're using manven.
Next time you won't see this message.

manven activates environments by leaving a command for your shell to run, so
it has to be called through a small shell function. Add it to your shell with:

    manven shell install

or load it for the current session only:

    eval \"$(manven shell init)\"        # bash, zsh, sh, dash
    manven shell init fish | source    # fish
"
    );
}

#[cfg(not(tarpaulin_include))]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let state = StatePaths::default_location()?;
    let relay = CommandRelay::new(&state.command_file);
    if !relay.is_initialized() {
        print_first_usage_notice();
    }
    relay
        .reset()
        .context("Failed to reset the pending command file")?;

    match cli.command {
        Commands::Activate(args) => commands::env::handle_activate(&args, &state),
        Commands::Create(args) => commands::env::handle_create(&args, &state),
        Commands::Deactivate => commands::env::handle_deactivate(&state),
        Commands::Remove { name } => commands::env::handle_remove(&name, &state),
        Commands::List { all } => commands::env::handle_list(all, &state),
        Commands::Temp(args) => commands::env::handle_temp(&args, &state),
        Commands::Prune => commands::env::handle_prune(&state),
        Commands::Last => commands::env::handle_last(&state),
        Commands::Get(cmd) => match cmd {
            GetCommands::Path => commands::get::handle_path(),
            GetCommands::CommandFile => commands::get::handle_command_file(&state),
            GetCommands::Active => commands::get::handle_active(&state),
        },
        Commands::Shell(cmd) => match cmd {
            ShellCommands::Init { shell } => commands::shell::handle_init(shell.as_deref(), &state),
            ShellCommands::Status => commands::shell::handle_status(&state),
            ShellCommands::Install => commands::shell::handle_install(&state),
            ShellCommands::Uninstall => commands::shell::handle_uninstall(),
        },
        Commands::Completions { shell } => commands::completions::handle::<Cli>(shell),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(),
            ConfigCommands::Path => commands::config::handle_path(),
            ConfigCommands::Init => commands::config::handle_init(),
        },
        Commands::Version => {
            println!("{}", version_string());
            Ok(())
        }
    }
}

/// Package version, with the git commit for development builds.
fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("VERGEN_GIT_SHA") {
        Some(sha) if !cfg!(feature = "release") && sha != "unknown" => {
            format!("{version} ({})", &sha[..sha.len().min(7)])
        }
        _ => version.to_string(),
    }
}
