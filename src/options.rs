//! Options forwarded to the environment-creation tool
//!
//! Each field maps onto one `virtualenv` flag. Boolean options become bare
//! flags, valued options become `--name=value`, and unset options are left
//! out entirely.

use serde::{Deserialize, Serialize};

/// Creation-tool options, settable from the `[virtualenv]` config section
/// and overridable on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolOptions {
    pub verbose: bool,
    pub quiet: bool,
    /// Interpreter to create the environment with (e.g. `python3.11`)
    pub python: Option<String>,
    pub clear: bool,
    pub system_site_packages: bool,
    pub always_copy: bool,
    pub relocatable: bool,
    pub no_setuptools: bool,
    pub no_pip: bool,
    pub no_wheel: bool,
    pub extra_search_dir: Option<String>,
    pub download: bool,
    pub no_download: bool,
    /// Prompt prefix shown while the environment is active
    pub prompt: Option<String>,
}

impl ToolOptions {
    /// Translate the options into command-line flags, in declaration order.
    pub fn to_flags(&self) -> Vec<String> {
        let table = [
            ("verbose", Opt::Switch(self.verbose)),
            ("quiet", Opt::Switch(self.quiet)),
            ("python", Opt::Value(&self.python)),
            ("clear", Opt::Switch(self.clear)),
            ("system_site_packages", Opt::Switch(self.system_site_packages)),
            ("always_copy", Opt::Switch(self.always_copy)),
            ("relocatable", Opt::Switch(self.relocatable)),
            ("no_setuptools", Opt::Switch(self.no_setuptools)),
            ("no_pip", Opt::Switch(self.no_pip)),
            ("no_wheel", Opt::Switch(self.no_wheel)),
            ("extra_search_dir", Opt::Value(&self.extra_search_dir)),
            ("download", Opt::Switch(self.download)),
            ("no_download", Opt::Switch(self.no_download)),
            ("prompt", Opt::Value(&self.prompt)),
        ];

        let mut flags = Vec::new();
        for (option, value) in table {
            let flag = format!("--{}", option.replace('_', "-"));
            match value {
                Opt::Switch(true) => flags.push(flag),
                Opt::Switch(false) => {}
                Opt::Value(value) => {
                    if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                        // `=` would split the value when the tool parses `--name=value`
                        flags.push(format!("{}={}", flag, value.replace('=', "")));
                    }
                }
            }
        }
        flags
    }

    /// Layer `overrides` on top of `self`. Set values win; switches are OR-ed,
    /// so an override cannot clear a switch that `self` has on.
    pub fn merged_with(&self, overrides: &ToolOptions) -> ToolOptions {
        ToolOptions {
            verbose: self.verbose || overrides.verbose,
            quiet: self.quiet || overrides.quiet,
            python: overrides.python.clone().or_else(|| self.python.clone()),
            clear: self.clear || overrides.clear,
            system_site_packages: self.system_site_packages || overrides.system_site_packages,
            always_copy: self.always_copy || overrides.always_copy,
            relocatable: self.relocatable || overrides.relocatable,
            no_setuptools: self.no_setuptools || overrides.no_setuptools,
            no_pip: self.no_pip || overrides.no_pip,
            no_wheel: self.no_wheel || overrides.no_wheel,
            extra_search_dir: overrides
                .extra_search_dir
                .clone()
                .or_else(|| self.extra_search_dir.clone()),
            download: self.download || overrides.download,
            no_download: self.no_download || overrides.no_download,
            prompt: overrides.prompt.clone().or_else(|| self.prompt.clone()),
        }
    }
}

enum Opt<'a> {
    Switch(bool),
    Value(&'a Option<String>),
}
