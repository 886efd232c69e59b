//! Shell identity and shell integration
//!
//! Detects the invoking shell, generates the wrapper function that sources
//! the pending-command file, and installs it into `.zshrc` / `.bashrc`
//! inside a marked section.

pub mod install;
pub mod kind;
pub mod paths;
pub mod status;
pub mod wrapper;

pub use install::{detect_shell_from_rc, generate_section, install, uninstall, MARKER_WARNING};
pub use kind::{ShellKind, SHELL_ENV_VAR};
pub use paths::{all_shell_rcs, detect_shell_rc, rc_for_shell};
pub use status::{find_installed_rc, get_status, is_installed_in, ShellStatus, MARKER_END, MARKER_START};
pub use wrapper::{generate as generate_wrapper, LOADED_ENV_VAR};
