use std::collections::HashMap;
use std::ffi::OsString;

use crate::param::Param;
use crate::resolve::{self, Resolution};
use crate::types::ConfigFile;

/// The declared parameters of a program, plus its config files.
///
/// Built once by [`ParamSetBuilder::build`](crate::ParamSetBuilder::build)
/// and read-only afterwards. Each [`parse`](Self::parse) call is an
/// independent resolution pass with its own [`Resolution`].
#[derive(Debug)]
pub struct Registry {
    pub(crate) named: Vec<Param>,
    pub(crate) by_name: HashMap<String, usize>,
    pub(crate) positional: Vec<Param>,
    pub(crate) prog_base_name: String,
    pub(crate) terminal_param: Option<String>,
    pub(crate) config_files: Vec<ConfigFile>,
    pub(crate) group_config_files: Vec<(String, Vec<ConfigFile>)>,
}

impl Registry {
    /// Look up a named parameter by its name or any alternative name.
    pub fn get(&self, name: &str) -> Option<&Param> {
        self.by_name.get(name).map(|&idx| &self.named[idx])
    }

    /// Named parameters in declaration order.
    pub fn params(&self) -> impl Iterator<Item = &Param> {
        self.named.iter()
    }

    /// Positional parameters in binding order.
    pub fn positional(&self) -> &[Param] {
        &self.positional
    }

    /// Every name and alternative name of the named parameters, in no
    /// particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    /// Base name of the running program, used to match `prog/param` lines.
    pub fn prog_base_name(&self) -> &str {
        &self.prog_base_name
    }

    /// The token that ends command-line parsing, if any.
    pub fn terminal_param(&self) -> Option<&str> {
        self.terminal_param.as_deref()
    }

    /// A copy of the global config files, in reading order.
    pub fn config_files(&self) -> Vec<ConfigFile> {
        self.config_files.clone()
    }

    /// A copy of the config files for `group`, in reading order.
    pub fn group_config_files(&self, group: &str) -> Vec<ConfigFile> {
        self.group_config_files
            .iter()
            .find(|(g, _)| g == group)
            .map(|(_, files)| files.clone())
            .unwrap_or_default()
    }

    /// Groups that have config files, in the order they were first given one.
    pub fn config_groups(&self) -> impl Iterator<Item = &str> {
        self.group_config_files.iter().map(|(g, _)| g.as_str())
    }

    /// Run a resolution pass: config files first, then `args`.
    ///
    /// `args` should not include the program name.
    pub fn parse<I, S>(&self, args: I) -> Resolution
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        resolve::resolve(self, &args)
    }

    /// Run a resolution pass over the process arguments (minus the program name).
    /// Arguments that are not valid UTF-8 are converted lossily.
    pub fn parse_env(&self) -> Resolution {
        self.parse(lossy_args(std::env::args_os().skip(1)))
    }
}

fn lossy_args(args: impl IntoIterator<Item = OsString>) -> Vec<String> {
    args.into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}
