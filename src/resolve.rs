//! One resolution pass: config files, then the command line.
//!
//! Both stages write through the same setters, so a value given on the
//! command line replaces one read from a file, and a later file replaces an
//! earlier one. Steps:
//!
//! 1. Group config files, group by group, each group's files in order added
//! 2. Global config files, in order added
//! 3. Positional command-line arguments
//! 4. Named command-line arguments, up to the terminal token
//!
//! Every stage records problems in the pass's [`ErrorMap`] and carries on.

use std::collections::{BTreeMap, HashMap};

use crate::cmdline;
use crate::errmap::{ErrorMap, LocatedError};
use crate::file;
use crate::location::SourceLocation;
use crate::param::Param;
use crate::registry::Registry;

/// The outcome of a resolution pass.
#[derive(Debug, Default)]
pub struct Resolution {
    pub(crate) errors: ErrorMap,
    pub(crate) remainder: Vec<String>,
    pub(crate) unused: BTreeMap<String, Vec<SourceLocation>>,
    pub(crate) set_at: HashMap<String, Vec<SourceLocation>>,
}

impl Resolution {
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn into_errors(self) -> ErrorMap {
        self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Arguments left unparsed after a terminal positional parameter or the
    /// terminal token.
    pub fn remainder(&self) -> &[String] {
        &self.remainder
    }

    /// Config-file lines meant for other programs, keyed by parameter name.
    pub fn unused(&self) -> &BTreeMap<String, Vec<SourceLocation>> {
        &self.unused
    }

    /// Every place the named parameter was successfully set from, in order.
    pub fn set_at(&self, name: &str) -> &[SourceLocation] {
        self.set_at.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn was_set(&self, name: &str) -> bool {
        self.set_at.contains_key(name)
    }

    /// Set `param` from `value`, recording either where it was set or why not.
    pub(crate) fn apply(&mut self, param: &Param, location: &SourceLocation, value: Option<&str>) {
        match param.process(location, value) {
            Ok(()) => self
                .set_at
                .entry(param.name().to_string())
                .or_default()
                .push(location.clone()),
            Err(e) => self
                .errors
                .record(param.name(), LocatedError::at(e, location)),
        }
    }

    pub(crate) fn mark_unused(&mut self, name: &str, location: &SourceLocation) {
        tracing::debug!(param = name, %location, "config line is for another program");
        self.unused
            .entry(name.to_string())
            .or_default()
            .push(location.clone());
    }
}

/// Resolve config files and then `args` against `registry`.
pub fn resolve(registry: &Registry, args: &[String]) -> Resolution {
    let mut res = Resolution::default();
    file::resolve_config_files(registry, &mut res);
    cmdline::parse_args(registry, args, &mut res);
    res
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use crate::fixtures::test::Fixture;
    use crate::types::Exists;

    #[test]
    fn command_line_overrides_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("myprog.cfg");
        fs::write(&path, "count = 3\nverbose\n").unwrap();

        let f = Fixture::new();
        let reg = f
            .named_builder()
            .add_config_file(&path, Exists::MustExist)
            .build()
            .unwrap();
        let res = reg.parse(["--count", "5"]);

        assert!(!res.has_errors(), "{}", res.errors().report());
        assert_eq!(f.count.get(), 5);
        assert!(f.verbose.get(), "file values not overridden are kept");
        let sources: Vec<_> = res.set_at("count").iter().map(|l| l.source.clone()).collect();
        assert_eq!(sources, vec![path.display().to_string(), "command line".to_string()]);
    }

    #[test]
    fn later_global_file_overrides_earlier() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("first.cfg");
        let second = dir.path().join("second.cfg");
        fs::write(&first, "count = 1\n").unwrap();
        fs::write(&second, "count = 2\n").unwrap();

        let f = Fixture::new();
        let reg = f
            .named_builder()
            .add_config_file(&first, Exists::Optional)
            .add_config_file(&second, Exists::Optional)
            .build()
            .unwrap();
        let res = reg.parse(Vec::<String>::new());

        assert!(!res.has_errors());
        assert_eq!(f.count.get(), 2);
    }

    #[test]
    fn global_files_read_after_group_files() {
        let dir = TempDir::new().unwrap();
        let global = dir.path().join("global.cfg");
        let group = dir.path().join("net.cfg");
        fs::write(&global, "port = 80\n").unwrap();
        fs::write(&group, "port = 8080\n").unwrap();

        let f = Fixture::new();
        let reg = f
            .named_builder()
            .add_config_file(&global, Exists::MustExist)
            .add_group_config_file("net", &group, Exists::MustExist)
            .build()
            .unwrap();
        let res = reg.parse(Vec::<String>::new());

        assert!(!res.has_errors(), "{}", res.errors().report());
        assert_eq!(f.port.get(), 80);
    }

    #[test]
    fn each_pass_starts_with_fresh_errors() {
        let f = Fixture::new();
        let reg = f.named_builder().build().unwrap();

        let first = reg.parse(["--bogus"]);
        assert!(first.errors().contains_key("bogus"));

        let second = reg.parse(["--verbose"]);
        assert!(!second.has_errors());
        assert!(second.was_set("verbose"));
        assert!(!second.was_set("count"));
    }
}
