//! Path detection for shell integration

use std::path::PathBuf;

use super::kind::ShellKind;

/// Get the path to the default shell RC file
pub fn detect_shell_rc() -> Option<PathBuf> {
    let home = dirs::home_dir()?;

    // Check zshrc first (more common on macOS)
    let zshrc = home.join(".zshrc");
    if zshrc.exists() {
        return Some(zshrc);
    }

    let bashrc = home.join(".bashrc");
    if bashrc.exists() {
        return Some(bashrc);
    }

    Some(zshrc)
}

/// RC file for `shell`, if manven knows how to install into it.
pub fn rc_for_shell(shell: ShellKind) -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    match shell {
        ShellKind::Zsh => Some(home.join(".zshrc")),
        ShellKind::Bash => Some(home.join(".bashrc")),
        _ => None,
    }
}

/// Get all possible shell RC files
pub fn all_shell_rcs() -> Vec<PathBuf> {
    let home = match dirs::home_dir() {
        Some(h) => h,
        None => return vec![],
    };

    vec![home.join(".zshrc"), home.join(".bashrc")]
}
