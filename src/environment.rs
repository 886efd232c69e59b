//! Environment predicate and path resolution
//!
//! An environment is a directory under a store root. Whether it exists is
//! always derived from the filesystem: the activation script for the current
//! shell must be present under `bin/`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{at, Result};
use crate::shell::ShellKind;

/// Name of the reserved sub-store holding temporary environments.
pub const TEMP_DIR: &str = ".temp";

/// Join a store root and an environment name. No I/O.
pub fn resolve_path(name: &str, root: &Path) -> PathBuf {
    root.join(name)
}

/// Path of the activation script for `name` under `root`.
pub fn activation_script_path(name: &str, root: &Path, shell: ShellKind) -> PathBuf {
    resolve_path(name, root)
        .join("bin")
        .join(shell.activate_script())
}

/// Whether `name` is an existing environment under `root`.
///
/// A directory without an activation script (e.g. a half-created
/// environment) does not count.
pub fn exists(name: &str, root: &Path, shell: ShellKind) -> bool {
    activation_script_path(name, root, shell).exists()
}

/// Root of the temporary sub-store for a given store root.
pub fn temp_root(store_root: &Path) -> PathBuf {
    store_root.join(TEMP_DIR)
}

/// Whether a store-relative name refers to a temporary environment.
pub fn is_temporary(name: &str) -> bool {
    name == TEMP_DIR || name.starts_with(&format!("{TEMP_DIR}/"))
}

/// Display name of a temporary environment (`.temp/<name>`).
pub fn temp_display_name(name: &str) -> String {
    format!("{TEMP_DIR}/{name}")
}

/// Sorted names of the environments directly under `root`.
///
/// A missing root yields an empty list.
pub fn list_in(root: &Path, shell: ShellKind) -> Result<Vec<String>> {
    if !root.exists() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(root).map_err(at(root))? {
        let entry = entry.map_err(at(root))?;
        let script = entry.path().join("bin").join(shell.activate_script());
        if script.exists() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}
