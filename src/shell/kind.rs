//! Shell identity detection
//!
//! The invoking shell decides which activation script an environment is
//! sourced through. Identity comes from the basename of `$SHELL`.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::ManvenError;

/// Environment variable naming the user's shell binary.
pub const SHELL_ENV_VAR: &str = "SHELL";

/// Shells manven knows how to activate environments in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShellKind {
    Sh,
    Bash,
    Zsh,
    Dash,
    Csh,
    Fish,
}

impl ShellKind {
    /// Shell assumed when `$SHELL` is not set.
    pub const DEFAULT: ShellKind = ShellKind::Bash;

    /// Name of the activation script virtualenv generates for this shell.
    pub fn activate_script(self) -> &'static str {
        match self {
            ShellKind::Sh | ShellKind::Bash | ShellKind::Zsh | ShellKind::Dash => "activate",
            ShellKind::Csh => "activate.csh",
            ShellKind::Fish => "activate.fish",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShellKind::Sh => "sh",
            ShellKind::Bash => "bash",
            ShellKind::Zsh => "zsh",
            ShellKind::Dash => "dash",
            ShellKind::Csh => "csh",
            ShellKind::Fish => "fish",
        }
    }

    /// Identify a shell from the path of its binary (e.g. `/usr/bin/zsh`).
    pub fn from_shell_path(path: &str) -> Result<Self, ManvenError> {
        let name = Path::new(path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(path);
        name.parse()
    }

    /// Identify the invoking shell from `$SHELL`, falling back to bash.
    pub fn detect() -> Result<Self, ManvenError> {
        Self::from_env_value(std::env::var(SHELL_ENV_VAR).ok().as_deref())
    }

    /// Same as [`ShellKind::detect`] but with the variable's value passed in.
    pub fn from_env_value(value: Option<&str>) -> Result<Self, ManvenError> {
        match value {
            Some(v) if !v.trim().is_empty() => Self::from_shell_path(v.trim()),
            _ => Ok(Self::DEFAULT),
        }
    }
}

impl FromStr for ShellKind {
    type Err = ManvenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sh" => Ok(ShellKind::Sh),
            "bash" => Ok(ShellKind::Bash),
            "zsh" => Ok(ShellKind::Zsh),
            "dash" => Ok(ShellKind::Dash),
            "csh" => Ok(ShellKind::Csh),
            "fish" => Ok(ShellKind::Fish),
            other => Err(ManvenError::UnknownShell(other.to_string())),
        }
    }
}

impl fmt::Display for ShellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
