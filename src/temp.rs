//! Temporary environment name allocation

use std::path::Path;

/// Prefix shared by every generated temporary environment name.
pub const TEMP_PREFIX: &str = "temp_venv_";

/// Name of the `index`-th temporary environment.
pub fn temp_name(index: u64) -> String {
    format!("{TEMP_PREFIX}{index}")
}

/// First `temp_venv_<i>` with no entry under `temp_root`.
///
/// Nothing is created here; a concurrent invocation may pick the same name
/// before the caller creates it.
pub fn allocate(temp_root: &Path) -> String {
    let mut index = 0;
    loop {
        let name = temp_name(index);
        if !temp_root.join(&name).exists() {
            return name;
        }
        index += 1;
    }
}
