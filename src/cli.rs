//! CLI definitions for manven
//!
//! This module contains the clap CLI structure definitions, separated from main.rs
//! so they can be accessed by xtask for documentation generation (man pages, markdown).

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

use crate::options::ToolOptions;

/// Build clap styles.
///
/// - Green: headers, usage, command names
/// - White: descriptions, placeholders (renders as light gray on dark terminals)
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "manven")]
#[command(about = "Command line interface for managing virtual python environments")]
#[command(
    long_about = "manven - manage named Python virtual environments.

Environments are created with virtualenv under one directory (~/venvs by
default) and activated in the calling shell through a small wrapper function.

QUICK START:
    eval \"$(manven shell init)\"     Load the wrapper in the current shell
    manven activate web              Create (if needed) and activate 'web'
    manven temp                      Create and activate a throwaway environment
    manven list -a                   List environments, temporaries included
    manven prune                     Remove all temporary environments

SHELL INTEGRATION:
    manven shell install             Add the wrapper to ~/.zshrc or ~/.bashrc"
)]
#[command(version)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Activate (and create if it does not exist) an environment
    #[command(long_about = "Activate an environment, creating it first if it does not exist.

EXAMPLES:
    manven activate web                  Activate 'web', creating it if needed
    manven activate web --new            Replace 'web' with a fresh environment
    manven activate web2 --clone web     Create 'web2' as a copy of 'web'
    manven activate py312 --python python3.12")]
    Activate(EnvArgs),

    /// Create an environment without activating it
    Create(EnvArgs),

    /// Deactivate the active environment
    Deactivate,

    /// Remove an environment
    #[command(long_about = "Remove an environment from the store.

Removing a missing environment does nothing. The active environment cannot be
removed; deactivate it first.")]
    Remove {
        /// Environment name
        name: String,
    },

    /// List environments
    #[command(visible_alias = "ls")]
    List {
        /// Include temporary environments
        #[arg(short, long)]
        all: bool,
    },

    /// Create and activate a temporary environment
    #[command(long_about = "Create and activate a temporary environment.

Temporary environments live under <store>/.temp and are named temp_venv_<n>.
Remove them all at once with 'manven prune'.")]
    Temp(TempArgs),

    /// Remove all temporary environments
    Prune,

    /// Re-activate the last activated environment
    Last,

    /// Print a setting
    #[command(subcommand)]
    Get(GetCommands),

    /// Manage shell integration
    #[command(
        subcommand,
        long_about = "Manage the shell wrapper that applies activations to the calling shell.

A program cannot change the shell that started it, so manven writes the
command to run into a file and the wrapper sources it afterwards.

EXAMPLES:
    eval \"$(manven shell init)\"       Load the wrapper for this session
    manven shell init fish | source    Same, for fish
    manven shell install               Add the wrapper to ~/.zshrc or ~/.bashrc
    manven shell status                Check where the wrapper is installed"
    )]
    Shell(ShellCommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Print the version of manven
    Version,
}

/// Arguments shared by `activate` and `create`.
#[derive(Args, Debug, Clone)]
pub struct EnvArgs {
    /// Environment name
    pub name: String,

    /// Replace an existing environment with a fresh one
    #[arg(long)]
    pub new: bool,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub tool: ToolArgs,
}

#[derive(Args, Debug, Clone)]
pub struct TempArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub tool: ToolArgs,
}

/// What goes into a new environment.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Don't install manven in the new environment
    #[arg(long)]
    pub no_manven: bool,

    /// Don't install any of the configured default packages
    #[arg(long)]
    pub no_packages: bool,

    /// Clone an existing environment instead of creating a fresh one
    #[arg(long, value_name = "SRC")]
    pub clone: Option<String>,
}

/// Options forwarded to virtualenv, overriding the [virtualenv] config section.
///
/// Values replace the configured ones. Switches can only turn an option on:
/// a switch set to `true` in the config stays on whatever is passed here.
#[derive(Args, Debug, Clone, Default)]
pub struct ToolArgs {
    /// Interpreter to create the environment with
    #[arg(long, value_name = "PYTHON")]
    pub python: Option<String>,

    /// Prompt prefix while the environment is active
    #[arg(long)]
    pub prompt: Option<String>,

    /// Give the environment access to the system site-packages
    #[arg(long)]
    pub system_site_packages: bool,

    /// Copy files instead of symlinking
    #[arg(long)]
    pub always_copy: bool,

    /// Clear the destination directory before creating
    #[arg(long)]
    pub clear: bool,

    /// Don't download seed packages
    #[arg(long)]
    pub no_download: bool,

    /// Extra directory to look for seed packages in
    #[arg(long, value_name = "DIR")]
    pub extra_search_dir: Option<String>,
}

impl ToolArgs {
    pub fn to_options(&self) -> ToolOptions {
        ToolOptions {
            python: self.python.clone(),
            prompt: self.prompt.clone(),
            system_site_packages: self.system_site_packages,
            always_copy: self.always_copy,
            clear: self.clear,
            no_download: self.no_download,
            extra_search_dir: self.extra_search_dir.clone(),
            ..Default::default()
        }
    }
}

#[derive(Subcommand)]
pub enum GetCommands {
    /// Directory where environments are stored
    Path,
    /// File holding the command for the shell wrapper to source
    CommandFile,
    /// Name of the active environment
    Active,
}

#[derive(Subcommand)]
pub enum ShellCommands {
    /// Print the wrapper for a shell (detected from $SHELL by default)
    Init {
        /// Shell to generate the wrapper for (bash, zsh, sh, dash, fish, csh)
        shell: Option<String>,
    },
    /// Show shell integration status
    Status,
    /// Install the wrapper into ~/.zshrc or ~/.bashrc
    Install,
    /// Remove the wrapper from the RC file
    Uninstall,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Print the path of the config file in use
    Path,
    /// Write the default configuration to ~/.config/manven/manven.toml
    Init,
}
