//! Status detection and reporting for shell integration

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::kind::ShellKind;
use super::paths::all_shell_rcs;
use super::wrapper::LOADED_ENV_VAR;

/// Marker comments for shell integration sections
pub const MARKER_START: &str = "# >>> manven (virtualenv manager) >>>";
pub const MARKER_END: &str = "# <<< manven (virtualenv manager) <<<";

/// Information about shell integration status
#[derive(Debug, Clone)]
pub struct ShellStatus {
    /// Which RC file has the integration installed
    pub rc_file: Option<PathBuf>,
    /// Whether the wrapper is loaded in the current shell
    pub is_loaded: bool,
    pub shell: ShellKind,
    /// Active environment relative to the store root
    pub active: Option<String>,
}

impl ShellStatus {
    /// Returns a human-readable summary of the status
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();

        if let Some(ref rc) = self.rc_file {
            lines.push(format!("Shell integration: installed in {}", rc.display()));
        } else {
            lines.push("Shell integration: not installed".to_string());
        }

        lines.push(format!("Shell: {}", self.shell));

        if self.is_loaded {
            lines.push("Status: active (wrapper loaded)".to_string());
        } else if self.rc_file.is_some() {
            lines.push("Status: installed (restart shell to activate)".to_string());
        }

        match self.active {
            Some(ref name) => lines.push(format!("Active environment: {name}")),
            None => lines.push("Active environment: none".to_string()),
        }

        lines.join("\n")
    }
}

/// Check if shell integration is installed in an RC file
pub fn is_installed_in(rc_file: &Path) -> io::Result<bool> {
    if !rc_file.exists() {
        return Ok(false);
    }

    let content = fs::read_to_string(rc_file)?;
    Ok(content.contains(MARKER_START) && content.contains(MARKER_END))
}

/// Find which RC file has shell integration installed
pub fn find_installed_rc() -> Option<PathBuf> {
    all_shell_rcs()
        .into_iter()
        .find(|rc| is_installed_in(rc).unwrap_or(false))
}

/// Get the shell integration status
pub fn get_status(shell: ShellKind, active: Option<String>) -> ShellStatus {
    ShellStatus {
        rc_file: find_installed_rc(),
        is_loaded: std::env::var(LOADED_ENV_VAR).is_ok(),
        shell,
        active,
    }
}
