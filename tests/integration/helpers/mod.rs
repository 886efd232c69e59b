//! Helpers for running the manven binary against an isolated home directory

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Creates `<name>/bin/activate*` in the working directory, like virtualenv.
const FAKE_VIRTUALENV: &str = r#"#!/bin/sh
for arg in "$@"; do name="$arg"; done
mkdir -p "$name/bin"
touch "$name/bin/activate" "$name/bin/activate.csh" "$name/bin/activate.fish"
"#;

/// An isolated HOME with a config pointing at a fake virtualenv.
pub struct CliEnv {
    pub home: TempDir,
}

impl CliEnv {
    pub fn new() -> Self {
        let home = TempDir::new().expect("Failed to create temp home");
        let env = Self { home };
        env.write_fake_virtualenv();
        env.write_config(&format!(
            "[storage]\nenvs_path = \"{}\"\n\n[packages]\ndefault = []\n\n[tools]\nvirtualenv = \"{}\"\n",
            env.store_root().display(),
            env.fake_virtualenv().display()
        ));
        env
    }

    pub fn store_root(&self) -> PathBuf {
        self.home.path().join("venvs")
    }

    pub fn state_dir(&self) -> PathBuf {
        self.home.path().join(".config").join("manven")
    }

    pub fn command_file(&self) -> PathBuf {
        self.state_dir().join("to_execute.sh")
    }

    pub fn pending(&self) -> String {
        fs::read_to_string(self.command_file()).unwrap_or_default()
    }

    pub fn fake_virtualenv(&self) -> PathBuf {
        self.home.path().join("bin").join("virtualenv")
    }

    /// Replace the config file (read from the working directory).
    pub fn write_config(&self, contents: &str) {
        fs::write(self.home.path().join(".manven.toml"), contents).expect("Failed to write config");
    }

    /// Create the command file so the first-usage notice stays quiet.
    pub fn mark_initialized(&self) {
        fs::create_dir_all(self.state_dir()).expect("Failed to create state dir");
        fs::write(self.command_file(), "").expect("Failed to write command file");
    }

    fn write_fake_virtualenv(&self) {
        let path = self.fake_virtualenv();
        fs::create_dir_all(path.parent().unwrap_or(Path::new("."))).expect("Failed to create bin");
        fs::write(&path, FAKE_VIRTUALENV).expect("Failed to write fake virtualenv");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
                .expect("Failed to make fake virtualenv executable");
        }
    }

    /// The manven binary, run from the isolated home with bash as the shell.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("manven").expect("manven binary not built");
        cmd.current_dir(self.home.path())
            .env("HOME", self.home.path())
            .env("SHELL", "/bin/bash")
            .env("NO_COLOR", "1")
            .env_remove("VIRTUAL_ENV")
            .env_remove("MANVEN_LOG");
        cmd
    }
}
