//! Environment lifecycle management
//!
//! Creates, clones, replaces, removes, lists and activates environments in a
//! store root. Activation never touches the calling shell directly: it leaves
//! a `source <script>` line in the [`CommandRelay`] for the shell wrapper.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use crate::config::{Settings, StatePaths};
use crate::environment::{
    activation_script_path, exists, is_temporary, list_in, resolve_path, temp_display_name,
    temp_root,
};
use crate::error::{at, ManvenError, Result};
use crate::options::ToolOptions;
use crate::record::LastActivated;
use crate::relay::CommandRelay;
use crate::shell::ShellKind;
use crate::temp;
use crate::tools::{Invocation, SystemRunner, ToolRunner};
use crate::SELF_PACKAGE;

/// Environment variable set by an activated virtualenv.
pub const VIRTUAL_ENV_VAR: &str = "VIRTUAL_ENV";

/// How an environment should be created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateOptions {
    /// Delete an existing environment of the same name first
    pub replace: bool,
    /// Clone this existing environment instead of creating a fresh one
    pub clone_from: Option<String>,
    /// Installed with pip after creation (ignored when cloning)
    pub packages: Vec<String>,
    pub installer_flags: Vec<String>,
    pub tool: ToolOptions,
}

impl CreateOptions {
    /// Options carrying the configured packages and tool defaults.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            replace: false,
            clone_from: None,
            packages: settings.default_packages.clone(),
            installer_flags: settings.installer_flags.clone(),
            tool: settings.tool_options.clone(),
        }
    }
}

/// What [`EnvironmentManager::create`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    Cloned,
    /// An existing environment was deleted and created again
    Replaced,
    /// The environment already existed and was left alone
    Kept,
}

/// Runs lifecycle operations against one store root.
pub struct EnvironmentManager<R: ToolRunner = SystemRunner> {
    settings: Settings,
    shell: ShellKind,
    relay: CommandRelay,
    record_path: PathBuf,
    active: Option<PathBuf>,
    runner: R,
}

impl EnvironmentManager<SystemRunner> {
    /// Manager for the invoking process: shell from `$SHELL`, active
    /// environment from `$VIRTUAL_ENV`, real external tools.
    pub fn from_env(settings: Settings, state: StatePaths) -> Result<Self> {
        let shell = ShellKind::detect()?;
        let active = std::env::var_os(VIRTUAL_ENV_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Ok(Self::new(settings, state, shell, SystemRunner).with_active_env(active))
    }
}

impl<R: ToolRunner> EnvironmentManager<R> {
    pub fn new(settings: Settings, state: StatePaths, shell: ShellKind, runner: R) -> Self {
        Self {
            settings,
            shell,
            relay: CommandRelay::new(state.command_file),
            record_path: state.last_activated,
            active: None,
            runner,
        }
    }

    /// Set the directory of the currently active environment, if any.
    pub fn with_active_env(mut self, active: Option<PathBuf>) -> Self {
        self.active = active;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store_root(&self) -> &Path {
        &self.settings.store_root
    }

    pub fn shell(&self) -> ShellKind {
        self.shell
    }

    pub fn relay(&self) -> &CommandRelay {
        &self.relay
    }

    pub fn record_path(&self) -> &Path {
        &self.record_path
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Create `name` in the store root.
    pub fn create(&self, name: &str, options: &CreateOptions) -> Result<CreateOutcome> {
        let root = self.settings.store_root.clone();
        self.create_in(name, &root, options)
    }

    /// Create `name` under `root`.
    ///
    /// An existing environment is kept unless `options.replace` is set, in
    /// which case it is deleted before the creation tool runs. A clone source
    /// is always looked up in the store root, so temporary environments can
    /// be cloned from named ones.
    pub fn create_in(
        &self,
        name: &str,
        root: &Path,
        options: &CreateOptions,
    ) -> Result<CreateOutcome> {
        let tools = &self.settings.tools;
        if !self.runner.is_available(&tools.virtualenv) {
            return Err(ManvenError::ToolMissing {
                tool: tools.virtualenv.clone(),
            });
        }
        if let Some(source) = &options.clone_from {
            if !self.runner.is_available(&tools.clone) {
                return Err(ManvenError::ToolMissing {
                    tool: tools.clone.clone(),
                });
            }
            if !exists(source, &self.settings.store_root, self.shell) {
                return Err(ManvenError::NotFound {
                    name: source.clone(),
                });
            }
        }

        let replaced = if exists(name, root, self.shell) {
            if !options.replace {
                tracing::debug!(name, root = %root.display(), "environment already exists");
                return Ok(CreateOutcome::Kept);
            }
            let path = resolve_path(name, root);
            tracing::debug!(path = %path.display(), "removing environment before recreating it");
            fs::remove_dir_all(&path).map_err(at(&path))?;
            true
        } else {
            false
        };

        fs::create_dir_all(root).map_err(at(root))?;

        match &options.clone_from {
            Some(source) => {
                let source_path = resolve_path(source, &self.settings.store_root);
                let invocation = Invocation::new(&tools.clone)
                    .arg(source_path.display().to_string())
                    .arg(name)
                    .current_dir(root);
                match self.runner.run(&invocation) {
                    Ok(out) if out.success => {}
                    Ok(out) => {
                        return Err(ManvenError::CloneFailed {
                            from: source.clone(),
                            name: name.to_string(),
                            stderr: out.stderr,
                        })
                    }
                    Err(e) => {
                        return Err(ManvenError::CloneFailed {
                            from: source.clone(),
                            name: name.to_string(),
                            stderr: e.to_string(),
                        })
                    }
                }
            }
            None => {
                let invocation = Invocation::new(&tools.virtualenv)
                    .args(options.tool.to_flags())
                    .arg(name)
                    .current_dir(root);
                match self.runner.run(&invocation) {
                    Ok(out) if out.success => {}
                    Ok(out) => {
                        return Err(ManvenError::CreationFailed {
                            name: name.to_string(),
                            stderr: out.stderr,
                        })
                    }
                    Err(e) => {
                        return Err(ManvenError::CreationFailed {
                            name: name.to_string(),
                            stderr: e.to_string(),
                        })
                    }
                }
                if !options.packages.is_empty() {
                    self.install_packages(name, root, options)?;
                }
            }
        }

        let outcome = if replaced {
            CreateOutcome::Replaced
        } else if options.clone_from.is_some() {
            CreateOutcome::Cloned
        } else {
            CreateOutcome::Created
        };
        tracing::debug!(name, root = %root.display(), ?outcome, "environment ready");
        Ok(outcome)
    }

    fn install_packages(&self, name: &str, root: &Path, options: &CreateOptions) -> Result<()> {
        let bin = resolve_path(name, root).join("bin");
        let invocation = Invocation::new(bin.join("pip"))
            .arg("install")
            .args(options.installer_flags.iter().cloned())
            .args(options.packages.iter().cloned());

        let failed = |stderr: String| ManvenError::InstallFailed {
            name: name.to_string(),
            packages: options.packages.join(" "),
            stderr,
        };
        match self.runner.run(&invocation) {
            Ok(out) if out.success => {}
            Ok(out) => return Err(failed(out.stderr)),
            Err(e) => return Err(failed(e.to_string())),
        }

        if options.packages.iter().any(|p| p == SELF_PACKAGE) {
            self.self_check(&bin);
        }
        Ok(())
    }

    /// Run the freshly installed manven once and touch the command file it
    /// reports, so its first invocation does not show the onboarding notice.
    fn self_check(&self, bin: &Path) {
        let invocation = Invocation::new(bin.join(SELF_PACKAGE))
            .args(["get", "command-file"])
            .capture_stdout();
        let output = match self.runner.run(&invocation) {
            Ok(out) if out.success => out,
            Ok(out) => {
                tracing::warn!(code = ?out.code, stderr = %out.stderr.trim(), "self-check of installed manven failed");
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not run installed manven");
                return;
            }
        };

        let reported = output.stdout.trim();
        if reported.is_empty() {
            tracing::warn!("installed manven did not report a command file");
            return;
        }
        let path = PathBuf::from(reported);
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::warn!(path = %parent.display(), error = %e, "could not create state directory");
                return;
            }
        }
        if let Err(e) = OpenOptions::new().create(true).append(true).open(&path) {
            tracing::warn!(path = %path.display(), error = %e, "could not touch command file");
        }
    }

    /// Activate `name` from the store root.
    pub fn activate(&self, name: &str) -> Result<()> {
        let root = self.settings.store_root.clone();
        self.activate_in(name, &root)
    }

    /// Queue `source <activation script>` and remember `(name, root)`.
    pub fn activate_in(&self, name: &str, root: &Path) -> Result<()> {
        if !exists(name, root, self.shell) {
            return Err(ManvenError::NotFound {
                name: name.to_string(),
            });
        }
        let script = activation_script_path(name, root, self.shell);
        LastActivated::new(name, root).save(&self.record_path)?;
        self.relay
            .write(&["source".to_string(), script.display().to_string()])?;
        Ok(())
    }

    /// Queue `deactivate`, whether or not an environment is active.
    pub fn deactivate(&self) -> Result<()> {
        self.relay.write(&["deactivate"])
    }

    /// Sorted environment names, followed by `.temp/<name>` entries when
    /// `include_temporary` is set.
    pub fn list(&self, include_temporary: bool) -> Result<Vec<String>> {
        let mut names = list_in(&self.settings.store_root, self.shell)?;
        if include_temporary {
            let temps = list_in(&temp_root(&self.settings.store_root), self.shell)?;
            names.extend(temps.iter().map(|n| temp_display_name(n)));
        }
        Ok(names)
    }

    /// Create and activate a new temporary environment, returning its
    /// `.temp/<name>` display name.
    pub fn activate_temp(&self, options: &CreateOptions) -> Result<String> {
        let root = temp_root(&self.settings.store_root);
        let name = temp::allocate(&root);
        self.create_in(&name, &root, options)?;
        self.activate_in(&name, &root)?;
        Ok(temp_display_name(&name))
    }

    /// Delete everything in the temporary sub-store, in name order.
    ///
    /// Refuses to touch anything while a temporary environment is active.
    pub fn prune_temp(&self) -> Result<Vec<String>> {
        if let Some(active) = self.active_environment() {
            if is_temporary(&active) {
                return Err(ManvenError::Busy { name: active });
            }
        }

        let root = temp_root(&self.settings.store_root);
        if !root.exists() {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&root)
            .map_err(at(&root))?
            .map(|entry| {
                entry
                    .map(|e| (e.file_name().to_string_lossy().into_owned(), e.path()))
                    .map_err(at(&root))
            })
            .collect::<Result<Vec<(String, PathBuf)>>>()?;
        entries.sort();

        let mut removed = Vec::with_capacity(entries.len());
        for (name, path) in entries {
            let metadata = fs::symlink_metadata(&path).map_err(at(&path))?;
            tracing::debug!(path = %path.display(), "pruning");
            if metadata.is_dir() {
                fs::remove_dir_all(&path).map_err(at(&path))?;
            } else {
                fs::remove_file(&path).map_err(at(&path))?;
            }
            removed.push(name);
        }
        Ok(removed)
    }

    /// Remove `name` from the store root.
    pub fn remove(&self, name: &str) -> Result<bool> {
        let root = self.settings.store_root.clone();
        self.remove_in(name, &root)
    }

    /// Delete `name` under `root`. Returns whether anything was removed; a
    /// missing environment is not an error.
    pub fn remove_in(&self, name: &str, root: &Path) -> Result<bool> {
        let path = resolve_path(name, root);
        if self.is_active_path(&path) {
            return Err(ManvenError::Busy {
                name: name.to_string(),
            });
        }
        if !exists(name, root, self.shell) {
            tracing::debug!(path = %path.display(), "nothing to remove");
            return Ok(false);
        }
        tracing::debug!(path = %path.display(), "removing environment");
        fs::remove_dir_all(&path).map_err(at(&path))?;
        Ok(true)
    }

    /// Re-activate the last activated environment. `Ok(None)` when nothing
    /// has been activated yet.
    pub fn open_last(&self) -> Result<Option<LastActivated>> {
        match LastActivated::load(&self.record_path)? {
            Some(record) => {
                self.activate_in(&record.name, &record.root)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// Name of the active environment relative to the store root, comparing
    /// resolved paths when the direct comparison fails.
    ///
    /// `None` when no environment is active or it lives outside the store.
    pub fn active_environment(&self) -> Option<String> {
        let active = self.active.as_ref()?;
        let store_root = &self.settings.store_root;
        let relative = match active.strip_prefix(store_root) {
            Ok(relative) => relative.to_path_buf(),
            Err(_) => {
                let active = active.canonicalize().ok()?;
                let root = store_root.canonicalize().ok()?;
                active.strip_prefix(&root).ok()?.to_path_buf()
            }
        };
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }

    fn is_active_path(&self, path: &Path) -> bool {
        let Some(active) = &self.active else {
            return false;
        };
        if active == path {
            return true;
        }
        match (active.canonicalize(), path.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}
