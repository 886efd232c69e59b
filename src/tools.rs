//! External tool invocation
//!
//! Every process manven spawns (virtualenv, virtualenv-clone, pip and the
//! self-check of a freshly installed manven) goes through [`ToolRunner`], so
//! the lifecycle logic can be exercised without those tools installed.

use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Default environment-creation tool.
pub const VIRTUALENV: &str = "virtualenv";

/// Default environment-clone tool.
pub const VIRTUALENV_CLONE: &str = "virtualenv-clone";

/// A single external command to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    /// Capture stdout instead of passing it through to the terminal
    pub capture_stdout: bool,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            capture_stdout: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn capture_stdout(mut self) -> Self {
        self.capture_stdout = true;
        self
    }

    /// Human-readable command line, for logs and error messages.
    pub fn display(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Result of a finished external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub success: bool,
    pub code: Option<i32>,
    /// Empty unless the invocation asked for stdout to be captured
    pub stdout: String,
    pub stderr: String,
}

/// Runs external tools on behalf of the environment manager.
pub trait ToolRunner {
    /// Whether `program` can be found (on `PATH`, or directly if it is a path).
    fn is_available(&self, program: &str) -> bool;

    /// Run the invocation to completion. There is no timeout.
    fn run(&self, invocation: &Invocation) -> io::Result<ToolOutput>;
}

/// Production runner backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn is_available(&self, program: &str) -> bool {
        is_executable_in_path(program)
    }

    fn run(&self, invocation: &Invocation) -> io::Result<ToolOutput> {
        tracing::debug!(command = %invocation.display(), cwd = ?invocation.cwd, "running tool");

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdin(Stdio::inherit())
            .stderr(Stdio::piped());
        if invocation.capture_stdout {
            command.stdout(Stdio::piped());
        } else {
            command.stdout(Stdio::inherit());
        }
        if let Some(cwd) = &invocation.cwd {
            command.current_dir(cwd);
        }

        let output = command.output()?;
        let result = ToolOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        tracing::debug!(code = ?result.code, "tool finished");
        Ok(result)
    }
}

/// Whether `program` resolves to a file, either as a path or via `PATH`.
pub fn is_executable_in_path(program: &str) -> bool {
    if program.is_empty() {
        return false;
    }
    if program.contains(std::path::MAIN_SEPARATOR) {
        return Path::new(program).is_file();
    }
    match env::var_os("PATH") {
        Some(path_var) => env::split_paths(&path_var).any(|dir| dir.join(program).is_file()),
        None => false,
    }
}
