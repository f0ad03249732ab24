use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::error::DefinitionError;
use crate::file;
use crate::param::Param;
use crate::registry::Registry;
use crate::types::{ConfigFile, Exists};

/// Default token that ends command-line parsing.
pub const DEFAULT_TERMINAL_PARAM: &str = "--";

/// Entry point for declaring a program's parameters.
pub struct ParamSet;

impl ParamSet {
    pub fn builder() -> ParamSetBuilder {
        ParamSetBuilder::new()
    }
}

/// Builder for a [`Registry`].
///
/// ```ignore
/// let count = Slot::new(0i64);
/// let registry = ParamSet::builder()
///     .prog_name("myprog")
///     .add(Param::new("count", setter::Int::new(&count), "how many"))
///     .add_config_file("/etc/myprog.cfg", Exists::Optional)
///     .build()?;
/// let resolution = registry.parse_env();
/// ```
pub struct ParamSetBuilder {
    prog_name: Option<String>,
    terminal_param: Option<String>,
    named: Vec<Param>,
    positional: Vec<Param>,
    config_files: Vec<ConfigFile>,
    group_config_files: Vec<(String, Vec<ConfigFile>)>,
}

impl ParamSetBuilder {
    fn new() -> Self {
        Self {
            prog_name: None,
            terminal_param: Some(DEFAULT_TERMINAL_PARAM.to_string()),
            named: Vec::new(),
            positional: Vec::new(),
            config_files: Vec::new(),
            group_config_files: Vec::new(),
        }
    }

    /// Set the program name used to match `prog/param` config lines.
    /// Only the final path component is kept. Defaults to that of `argv[0]`.
    pub fn prog_name(mut self, name: &str) -> Self {
        self.prog_name = Some(base_name(name));
        self
    }

    /// Set the token that ends parsing (default `"--"`). An empty string
    /// disables it.
    pub fn terminal_param(mut self, token: &str) -> Self {
        self.terminal_param = (!token.is_empty()).then(|| token.to_string());
        self
    }

    /// Add a named parameter.
    pub fn add(mut self, param: Param) -> Self {
        self.named.push(param);
        self
    }

    /// Add a positional parameter. Positional parameters bind to the leading
    /// command-line tokens in the order they are added.
    pub fn add_positional(mut self, param: Param) -> Self {
        self.positional.push(param);
        self
    }

    /// Replace the global config files with just `path`.
    ///
    /// A leading `~/` refers to the user's home directory.
    ///
    /// # Panics
    ///
    /// Panics if `exists` is [`Exists::MustNotExist`].
    pub fn set_config_file(mut self, path: impl Into<PathBuf>, exists: Exists) -> Self {
        self.config_files = vec![config_file(path.into(), exists, None)];
        self
    }

    /// Add a global config file. Files are read in the order they are added,
    /// so later files override earlier ones.
    ///
    /// # Panics
    ///
    /// Panics if `exists` is [`Exists::MustNotExist`].
    pub fn add_config_file(mut self, path: impl Into<PathBuf>, exists: Exists) -> Self {
        self.config_files
            .push(config_file(path.into(), exists, None));
        self
    }

    /// Replace the config files for `group` with just `path`.
    ///
    /// # Panics
    ///
    /// Panics if `exists` is [`Exists::MustNotExist`].
    pub fn set_group_config_file(
        mut self,
        group: &str,
        path: impl Into<PathBuf>,
        exists: Exists,
    ) -> Self {
        let cf = config_file(path.into(), exists, Some(group));
        *self.group_files_mut(group) = vec![cf];
        self
    }

    /// Add a config file for `group`. Group files may only mention parameters
    /// of that group.
    ///
    /// # Panics
    ///
    /// Panics if `exists` is [`Exists::MustNotExist`].
    pub fn add_group_config_file(
        mut self,
        group: &str,
        path: impl Into<PathBuf>,
        exists: Exists,
    ) -> Self {
        let cf = config_file(path.into(), exists, Some(group));
        self.group_files_mut(group).push(cf);
        self
    }

    fn group_files_mut(&mut self, group: &str) -> &mut Vec<ConfigFile> {
        let idx = match self.group_config_files.iter().position(|(g, _)| g == group) {
            Some(idx) => idx,
            None => {
                self.group_config_files
                    .push((group.to_string(), Vec::new()));
                self.group_config_files.len() - 1
            }
        };
        &mut self.group_config_files[idx].1
    }

    /// Check the declarations and produce the registry.
    pub fn build(self) -> Result<Registry, DefinitionError> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut claim = |name: &str| -> Result<(), DefinitionError> {
            if name.is_empty() {
                return Err(DefinitionError::EmptyName);
            }
            if !seen.insert(name.to_string()) {
                return Err(DefinitionError::DuplicateName(name.to_string()));
            }
            Ok(())
        };

        let mut by_name = HashMap::new();
        for (idx, param) in self.named.iter().enumerate() {
            for name in param.all_names() {
                claim(name)?;
                by_name.insert(name.to_string(), idx);
            }
        }

        let mut positional = self.positional;
        let mut terminal: Option<String> = None;
        for (pos, param) in positional.iter_mut().enumerate() {
            for name in param.all_names() {
                claim(name)?;
            }
            if let Some(t) = &terminal {
                return Err(DefinitionError::PositionalAfterTerminal {
                    name: param.name().to_string(),
                    terminal: t.clone(),
                });
            }
            if param.is_terminal() {
                terminal = Some(param.name().to_string());
            }
            param.position = Some(pos);
        }

        let prog_base_name = self.prog_name.unwrap_or_else(|| {
            std::env::args_os()
                .next()
                .map(|a| base_name(&a.to_string_lossy()))
                .unwrap_or_default()
        });

        Ok(Registry {
            named: self.named,
            by_name,
            positional,
            prog_base_name,
            terminal_param: self.terminal_param,
            config_files: self.config_files,
            group_config_files: self.group_config_files,
        })
    }
}

fn base_name(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string())
}

fn config_file(path: PathBuf, exists: Exists, group: Option<&str>) -> ConfigFile {
    if exists == Exists::MustNotExist {
        match group {
            Some(g) => panic!(
                "config file '{}' (group '{g}'): bad existence constraint.",
                path.display()
            ),
            None => panic!("config file '{}': bad existence constraint.", path.display()),
        }
    }
    ConfigFile::new(file::expand_home(&path), exists)
}
