use std::path::PathBuf;

use thiserror::Error;

use crate::suggest::Suggestion;

/// A problem found while resolving parameters.
///
/// None of these stop a resolution pass; they are recorded in the
/// [`ErrorMap`](crate::ErrorMap) under the key of the parameter (or file)
/// they concern, so that every problem can be reported at once.
#[derive(Debug, Error)]
#[cfg_attr(feature = "rich-errors", derive(miette::Diagnostic))]
pub enum ParamError {
    #[error("{}", missing_positional_message(*missing, expected))]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(paramfig::missing_positional)))]
    MissingPositional { missing: usize, expected: Vec<String> },

    #[error("'{token}' is a parameter but does not start with either '--' or '-'")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(paramfig::syntax)))]
    Syntax { token: String },

    #[error("'{token}' has no parameter name after the leading '-'")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(paramfig::missing_name)))]
    MissingName { token: String },

    #[error(
        "this is not a parameter of this program{}",
        suggestion.as_ref().map(|s| format!(" (did you mean {s}?)")).unwrap_or_default()
    )]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(paramfig::unrecognized)))]
    Unrecognized {
        name: String,
        suggestion: Option<Suggestion>,
    },

    #[error("this parameter is not a member of group: {group}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(paramfig::not_in_group)))]
    NotInGroup { name: String, group: String },

    #[error("{reason}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(paramfig::invalid_value)))]
    InvalidValue { name: String, reason: String },

    #[error("action after setting '{name}' failed: {reason}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(paramfig::action_failed)))]
    ActionFailed { name: String, reason: String },

    #[error("cannot open {path}: {source}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(paramfig::file_access)))]
    FileAccess {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(paramfig::file_read)))]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ParamError {
    /// True if the file could not be opened at all, as opposed to failing part way.
    pub fn is_open_failure(&self) -> bool {
        matches!(self, ParamError::FileAccess { .. })
    }

    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ParamError::MissingPositional { .. } => "missing_positional",
            ParamError::Syntax { .. } => "syntax",
            ParamError::MissingName { .. } => "missing_name",
            ParamError::Unrecognized { .. } => "unrecognized",
            ParamError::NotInGroup { .. } => "not_in_group",
            ParamError::InvalidValue { .. } => "invalid_value",
            ParamError::ActionFailed { .. } => "action_failed",
            ParamError::FileAccess { .. } => "file_access",
            ParamError::FileRead { .. } => "file_read",
        }
    }
}

fn missing_positional_message(missing: usize, expected: &[String]) -> String {
    let listing = expected
        .iter()
        .map(|name| format!("<{name}>"))
        .collect::<Vec<_>>()
        .join(", ");
    let mini_help = if expected.len() == 1 {
        format!("The first parameter should be: {listing}")
    } else {
        format!(
            "The first {} parameters should be: {listing}",
            expected.len()
        )
    };

    if missing == 1 {
        format!("A parameter is missing, one more positional parameter is needed. {mini_help}")
    } else {
        format!(
            "Some parameters are missing, {missing} more positional parameters are needed. {mini_help}"
        )
    }
}

/// A mistake in how the owning program declared its parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("parameter names must not be empty")]
    EmptyName,

    #[error("parameter name '{0}' is already in use")]
    DuplicateName(String),

    #[error("positional parameter '{name}' follows the terminal positional parameter '{terminal}'")]
    PositionalAfterTerminal { name: String, terminal: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_one_of_one() {
        let err = ParamError::MissingPositional {
            missing: 1,
            expected: vec!["src".into()],
        };
        assert_eq!(
            err.to_string(),
            "A parameter is missing, one more positional parameter is needed. \
             The first parameter should be: <src>"
        );
    }

    #[test]
    fn missing_two_of_two() {
        let err = ParamError::MissingPositional {
            missing: 2,
            expected: vec!["src".into(), "dst".into()],
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Some parameters are missing, 2 more"));
        assert!(msg.ends_with("The first 2 parameters should be: <src>, <dst>"));
    }

    #[test]
    fn unrecognized_with_suggestion() {
        let err = ParamError::Unrecognized {
            name: "verbos".into(),
            suggestion: Some(Suggestion {
                names: vec!["verbose".into()],
                distance: 1,
            }),
        };
        assert_eq!(
            err.to_string(),
            "this is not a parameter of this program (did you mean verbose?)"
        );
    }

    #[test]
    fn unrecognized_without_suggestion() {
        let err = ParamError::Unrecognized {
            name: "x".into(),
            suggestion: None,
        };
        assert_eq!(err.to_string(), "this is not a parameter of this program");
    }

    #[test]
    fn missing_name_mentions_token() {
        let err = ParamError::MissingName { token: "--".into() };
        assert_eq!(err.to_string(), "'--' has no parameter name after the leading '-'");
        assert_eq!(err.kind(), "missing_name");
    }

    #[test]
    fn open_failure_is_distinguished() {
        let open = ParamError::FileAccess {
            path: "a.cfg".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let read = ParamError::FileRead {
            path: "a.cfg".into(),
            source: std::io::Error::from(std::io::ErrorKind::InvalidData),
        };
        assert!(open.is_open_failure());
        assert!(!read.is_open_failure());
        assert_eq!(open.kind(), "file_access");
    }

    #[test]
    fn definition_error_formats() {
        let err = DefinitionError::DuplicateName("count".into());
        assert!(err.to_string().contains("count"));
    }
}
