//! manven library
//!
//! Manages named Python virtual environments stored under one directory.
//! Environments are created by an external tool (`virtualenv`), and
//! activation is relayed to the calling shell through a command file that a
//! shell wrapper sources after the binary exits.

pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod manager;
pub mod options;
pub mod record;
pub mod relay;
pub mod shell;
pub mod temp;
pub mod tools;

/// Package name of manven itself, installed into new environments by default.
pub const SELF_PACKAGE: &str = "manven";

pub use config::{Config, Settings, StatePaths};
pub use error::{ManvenError, Result};
pub use manager::{CreateOptions, CreateOutcome, EnvironmentManager};
pub use options::ToolOptions;
pub use record::LastActivated;
pub use relay::CommandRelay;
pub use shell::{ShellKind, ShellStatus};
pub use tools::{Invocation, SystemRunner, ToolOutput, ToolRunner};
