//! Last-activated environment record
//!
//! A two-line text file: the environment name, then the absolute store root
//! it lives in. Rewritten on every activation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{at, ManvenError, Result};

/// The most recently activated environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastActivated {
    pub name: String,
    pub root: PathBuf,
}

impl LastActivated {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    /// Parse the file contents; `None` unless both lines are present.
    pub fn parse(contents: &str) -> Option<Self> {
        let mut lines = contents.lines();
        let name = lines.next()?.trim();
        let root = lines.next()?.trim();
        if name.is_empty() || root.is_empty() {
            return None;
        }
        Some(Self::new(name, root))
    }

    pub fn to_contents(&self) -> String {
        format!("{}\n{}\n", self.name, self.root.display())
    }

    /// Read the record at `path`. A missing file is `Ok(None)`.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path).map_err(at(path))?;
        Self::parse(&contents)
            .map(Some)
            .ok_or_else(|| ManvenError::CorruptRecord {
                path: path.to_path_buf(),
            })
    }

    /// Overwrite the record at `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(at(parent))?;
        }
        fs::write(path, self.to_contents()).map_err(at(path))
    }
}
