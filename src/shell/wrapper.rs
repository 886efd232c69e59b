//! Shell wrapper generation
//!
//! The wrapper runs the manven binary, then sources the pending-command file
//! in the calling shell when the binary left something in it.

use std::path::Path;

use super::kind::ShellKind;

/// Exported by the wrapper so `manven shell status` can tell it is loaded.
pub const LOADED_ENV_VAR: &str = "_MANVEN_LOADED";

/// Name of the shell function (or alias) the wrapper defines.
pub const FUNCTION_NAME: &str = "manven";

/// Wrapper code for `shell`, calling `binary` and sourcing `command_file`.
pub fn generate(shell: ShellKind, binary: &Path, command_file: &Path) -> String {
    let binary = quote(binary);
    let command_file = quote(command_file);

    match shell {
        ShellKind::Sh | ShellKind::Bash | ShellKind::Zsh | ShellKind::Dash => format!(
            r#"{FUNCTION_NAME}() {{
    {binary} "$@"
    _manven_status=$?
    if [ -s {command_file} ]; then
        . {command_file}
    fi
    return $_manven_status
}}
export {LOADED_ENV_VAR}=1
"#
        ),
        ShellKind::Fish => format!(
            r#"function {FUNCTION_NAME}
    {binary} $argv
    set -l manven_status $status
    if test -s {command_file}
        source {command_file}
    end
    return $manven_status
end
set -gx {LOADED_ENV_VAR} 1
"#
        ),
        ShellKind::Csh => format!(
            r#"alias {FUNCTION_NAME} '{binary} \!*; test -s {command_file} && source {command_file}'
setenv {LOADED_ENV_VAR} 1
"#
        ),
    }
}

fn quote(path: &Path) -> String {
    format!("\"{}\"", path.display())
}
