//! Config-file resolution.
//!
//! Each non-blank, non-comment line of a config file is one of:
//!
//! ```text
//! name = value
//! name                # no value, for flags
//! prog/name = value   # only applies when the program is called `prog`
//! ```
//!
//! Whitespace around the program name, parameter name and value is ignored.
//!
//! # Global files
//!
//! Global files may be shared by several programs, so an unscoped name that
//! this program doesn't know is skipped silently. A name scoped to this
//! program must exist; if it doesn't, it is reported as unrecognized.
//!
//! # Group files
//!
//! Group files belong to one group of one program. Any name this program
//! doesn't know is an error, and so is a known parameter from another group.
//!
//! In both kinds of file, a line scoped to some other program is set aside
//! as unused rather than reported.
//!
//! # Missing files
//!
//! A file that cannot be opened is reported under `"config file: <path>"`
//! unless it was registered as [`Exists::Optional`] and the failure to open
//! it is the only problem.

use std::path::{Path, PathBuf};

use crate::errmap::LocatedError;
use crate::error::ParamError;
use crate::lines::{FileParser, LineParser};
use crate::location::SourceLocation;
use crate::registry::Registry;
use crate::resolve::Resolution;
use crate::types::{ConfigFile, Exists};

/// Expand a leading `~/` to the user's home directory.
///
/// Paths without the prefix, or when no home directory can be found, are
/// returned unchanged.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match directories::UserDirs::new() {
        Some(user) => user.home_dir().join(rest),
        None => path.to_path_buf(),
    }
}

/// The platform config directory path for `file_name` belonging to `app_name`
/// (e.g. `~/.config/{app_name}/{file_name}` on Linux).
///
/// Returns `None` if no home directory can be found.
pub fn platform_config_file(app_name: &str, file_name: &str) -> Option<PathBuf> {
    let proj = directories::ProjectDirs::from("", "", app_name)?;
    Some(proj.config_dir().join(file_name))
}

/// Split `prog/name` into its (trimmed) program scope and parameter name.
/// An empty program scope counts as none.
fn split_param_name(spec: &str) -> (Option<&str>, &str) {
    match spec.split_once('/') {
        Some((prog, name)) => {
            let prog = prog.trim();
            ((!prog.is_empty()).then_some(prog), name.trim())
        }
        None => (None, spec.trim()),
    }
}

/// Split a line into its (possibly scoped) parameter name and trimmed value.
fn split_line(line: &str) -> (&str, Option<&str>) {
    match line.split_once('=') {
        Some((spec, value)) => (spec, Some(value.trim())),
        None => (line, None),
    }
}

struct GlobalLines<'a> {
    registry: &'a Registry,
    res: &'a mut Resolution,
}

impl LineParser for GlobalLines<'_> {
    fn parse_line(&mut self, line: &str, loc: &SourceLocation) -> Result<(), ParamError> {
        let (spec, value) = split_line(line);
        let (prog, name) = split_param_name(spec);

        let must_exist = match prog {
            Some(p) if p != self.registry.prog_base_name() => {
                self.res.mark_unused(name, loc);
                return Ok(());
            }
            Some(_) => true,
            None => false,
        };

        match self.registry.get(name) {
            Some(param) => self.res.apply(param, loc, value),
            None if must_exist => self.res.errors.record(
                name,
                LocatedError::at(
                    ParamError::Unrecognized {
                        name: name.to_string(),
                        suggestion: None,
                    },
                    loc,
                ),
            ),
            None => {
                tracing::trace!(param = name, %loc, "skipping parameter unknown to this program");
            }
        }
        Ok(())
    }
}

struct GroupLines<'a> {
    registry: &'a Registry,
    res: &'a mut Resolution,
    group: &'a str,
}

impl LineParser for GroupLines<'_> {
    fn parse_line(&mut self, line: &str, loc: &SourceLocation) -> Result<(), ParamError> {
        let (spec, value) = split_line(line);
        let (prog, name) = split_param_name(spec);

        if let Some(p) = prog
            && p != self.registry.prog_base_name()
        {
            self.res.mark_unused(name, loc);
            return Ok(());
        }

        let Some(param) = self.registry.get(name) else {
            self.res.errors.record(
                name,
                LocatedError::at(
                    ParamError::Unrecognized {
                        name: name.to_string(),
                        suggestion: None,
                    },
                    loc,
                ),
            );
            return Ok(());
        };

        if param.group_name() != Some(self.group) {
            self.res.errors.record(
                param.name(),
                LocatedError::at(
                    ParamError::NotInGroup {
                        name: param.name().to_string(),
                        group: self.group.to_string(),
                    },
                    loc,
                ),
            );
            return Ok(());
        }

        self.res.apply(param, loc, value);
        Ok(())
    }
}

/// Record the file-level errors from reading `cf`, unless the only problem is
/// that an optional file could not be opened.
fn check_errors(res: &mut Resolution, errors: Vec<ParamError>, cf: &ConfigFile) {
    if let [only] = errors.as_slice()
        && only.is_open_failure()
        && cf.exists == Exists::Optional
    {
        tracing::debug!(path = %cf.path.display(), "optional config file not read");
        return;
    }
    res.errors.record_all(
        cf.error_key(),
        errors.into_iter().map(|e| LocatedError::new(e, None)),
    );
}

/// Read every group config file, then every global config file.
pub(crate) fn resolve_config_files(registry: &Registry, res: &mut Resolution) {
    let mut fp = FileParser::new();

    for (group, files) in &registry.group_config_files {
        for cf in files {
            let mut lp = GroupLines {
                registry,
                res: &mut *res,
                group: group.as_str(),
            };
            let errors = fp.parse(&cf.path, &mut lp);
            tracing::debug!(
                path = %cf.path.display(),
                group = %group,
                stats = %fp.stats(),
                "group config file read"
            );
            check_errors(res, errors, cf);
        }
    }

    for cf in &registry.config_files {
        let mut lp = GlobalLines {
            registry,
            res: &mut *res,
        };
        let errors = fp.parse(&cf.path, &mut lp);
        tracing::debug!(path = %cf.path.display(), stats = %fp.stats(), "config file read");
        check_errors(res, errors, cf);
    }
}
