//! Error types for environment management.

use std::io;
use std::path::{Path, PathBuf};

/// Errors produced by the environment lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum ManvenError {
    #[error("{tool} is not installed or is not in the PATH")]
    ToolMissing { tool: String },

    #[error("Something went wrong when creating the environment {name}: {stderr}")]
    CreationFailed { name: String, stderr: String },

    #[error("Something went wrong when cloning {from} into {name}: {stderr}")]
    CloneFailed {
        from: String,
        name: String,
        stderr: String,
    },

    #[error("Something went wrong when installing {packages} into {name}: {stderr}")]
    InstallFailed {
        name: String,
        packages: String,
        stderr: String,
    },

    #[error("Environment {name} does not exist")]
    NotFound { name: String },

    #[error("Environment {name} is currently active, deactivate it first")]
    Busy { name: String },

    #[error("Unknown shell {0} (supported: bash, sh, zsh, dash, csh, fish)")]
    UnknownShell(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Last-activated record is malformed: {}", path.display())]
    CorruptRecord { path: PathBuf },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, ManvenError>;

impl ManvenError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: &Path, source: io::Error) -> Self {
        ManvenError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Shorthand for `map_err(|e| ManvenError::io(path, e))`.
pub(crate) fn at(path: &Path) -> impl FnOnce(io::Error) -> ManvenError + '_ {
    move |source| ManvenError::io(path, source)
}
