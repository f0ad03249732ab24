use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Whether a parameter takes a value after its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueReq {
    /// The parameter takes no value; [`setter::NoValue`](crate::setter::NoValue)
    /// rejects one if given.
    None,
    /// `--name` and `--name=value` are both accepted.
    Optional,
    /// A value must follow, either inline (`--name=value`) or as the next token.
    Mandatory,
}

/// Existence constraint on a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Exists {
    /// The file may be absent; absence is not reported.
    Optional,
    /// The file must be present; absence is reported under the file's key.
    MustExist,
    /// Not valid for config files. Registering a file with this constraint panics.
    MustNotExist,
}

/// A config file to read parameter values from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigFile {
    pub path: PathBuf,
    pub exists: Exists,
}

impl ConfigFile {
    pub fn new(path: impl Into<PathBuf>, exists: Exists) -> Self {
        Self {
            path: path.into(),
            exists,
        }
    }

    /// The key under which file-level failures for this file are recorded.
    pub fn error_key(&self) -> String {
        format!("config file: {}", self.path.display())
    }
}

impl fmt::Display for ConfigFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())?;
        if self.exists == Exists::MustExist {
            write!(f, " (must exist)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_marks_must_exist() {
        let cf = ConfigFile::new("/etc/myprog.cfg", Exists::MustExist);
        assert_eq!(cf.to_string(), "/etc/myprog.cfg (must exist)");
    }

    #[test]
    fn display_optional_is_bare_path() {
        let cf = ConfigFile::new("/etc/myprog.cfg", Exists::Optional);
        assert_eq!(cf.to_string(), "/etc/myprog.cfg");
    }

    #[test]
    fn error_key_is_file_scoped() {
        let cf = ConfigFile::new("conf/a.cfg", Exists::Optional);
        assert_eq!(cf.error_key(), "config file: conf/a.cfg");
    }

    #[test]
    fn value_req_serializes_lowercase() {
        let json = serde_json::to_string(&ValueReq::Mandatory).unwrap();
        assert_eq!(json, "\"mandatory\"");
    }
}
