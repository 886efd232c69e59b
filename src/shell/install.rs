//! RC file installation and uninstallation
//!
//! The wrapper is embedded directly into `.zshrc` / `.bashrc` between
//! marker comments, so it can be replaced or removed later.

use std::fs;
use std::io;
use std::path::Path;

use super::kind::ShellKind;
use super::status::{is_installed_in, MARKER_END, MARKER_START};
use super::wrapper;

/// Warning comment included in the shell integration section
pub const MARKER_WARNING: &str = "# DO NOT EDIT - managed by 'manven shell install/uninstall'";

/// Detect shell type from RC file name
pub fn detect_shell_from_rc(rc_file: &Path) -> ShellKind {
    let name = rc_file.file_name().and_then(|n| n.to_str()).unwrap_or("");

    if name.contains("zsh") {
        ShellKind::Zsh
    } else {
        ShellKind::Bash
    }
}

/// Generate the marked section holding the wrapper
pub fn generate_section(shell: ShellKind, binary: &Path, command_file: &Path) -> String {
    let script = wrapper::generate(shell, binary, command_file);
    format!(
        "{MARKER_START}\n{MARKER_WARNING}\n{}\n{MARKER_END}",
        script.trim_end()
    )
}

/// Install shell integration to an RC file
///
/// An existing section is replaced.
pub fn install(rc_file: &Path, binary: &Path, command_file: &Path) -> io::Result<()> {
    let shell = detect_shell_from_rc(rc_file);

    if is_installed_in(rc_file)? {
        uninstall(rc_file)?;
    }

    let content = if rc_file.exists() {
        fs::read_to_string(rc_file)?
    } else {
        String::new()
    };

    let section = generate_section(shell, binary, command_file);

    let new_content = if content.is_empty() {
        format!("{section}\n")
    } else if content.ends_with('\n') {
        format!("{content}\n{section}\n")
    } else {
        format!("{content}\n\n{section}\n")
    };

    fs::write(rc_file, new_content)
}

/// Uninstall shell integration from an RC file
pub fn uninstall(rc_file: &Path) -> io::Result<bool> {
    if !rc_file.exists() {
        return Ok(false);
    }

    let content = fs::read_to_string(rc_file)?;

    if !content.contains(MARKER_START) {
        return Ok(false);
    }

    let mut new_lines: Vec<&str> = Vec::new();
    let mut in_section = false;

    for line in content.lines() {
        if line.contains(MARKER_START) {
            in_section = true;
            continue;
        }
        if line.contains(MARKER_END) {
            in_section = false;
            continue;
        }
        if !in_section {
            new_lines.push(line);
        }
    }

    // Remove trailing empty lines that were before the section
    while new_lines.last().map(|l| l.is_empty()).unwrap_or(false) {
        new_lines.pop();
    }

    let new_content = if new_lines.is_empty() {
        String::new()
    } else {
        format!("{}\n", new_lines.join("\n"))
    };

    fs::write(rc_file, new_content)?;
    Ok(true)
}
