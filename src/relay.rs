//! Shell-command relay
//!
//! A child process cannot change its parent shell. Instead, manven leaves a
//! single pending command in a well-known file, and the shell wrapper sources
//! that file after the binary exits. The file holds at most one command: every
//! write replaces the previous content.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::error::{at, Result};

/// One-slot mailbox for the command the wrapping shell should run next.
#[derive(Debug, Clone)]
pub struct CommandRelay {
    path: PathBuf,
}

impl CommandRelay {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the pending-command file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file has ever been created (used for first-usage hints).
    pub fn is_initialized(&self) -> bool {
        self.path.exists()
    }

    /// Truncate the file to empty, creating it and its directory if needed.
    pub fn reset(&self) -> Result<()> {
        self.ensure_parent()?;
        File::create(&self.path).map_err(at(&self.path))?;
        Ok(())
    }

    /// Replace the pending command with `tokens` joined by single spaces.
    pub fn write<S: AsRef<str>>(&self, tokens: &[S]) -> Result<()> {
        let line = tokens
            .iter()
            .map(|t| t.as_ref())
            .collect::<Vec<_>>()
            .join(" ");
        self.ensure_parent()?;
        fs::write(&self.path, &line).map_err(at(&self.path))?;
        tracing::debug!(command = %line, path = %self.path.display(), "queued shell command");
        Ok(())
    }

    /// The pending command, or `None` if the file is empty or missing.
    pub fn pending(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path).map_err(at(&self.path))?;
        if contents.is_empty() {
            Ok(None)
        } else {
            Ok(Some(contents))
        }
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(at(parent))?;
            }
        }
        Ok(())
    }
}
