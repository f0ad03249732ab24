//! Accumulated errors from one resolution pass.
//!
//! Errors are keyed by the identity they concern: a parameter's canonical
//! name, the empty key for missing positional parameters, or
//! `"config file: <path>"` for file-level failures. Each key holds its errors
//! in the order they were recorded.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::ParamError;
use crate::location::SourceLocation;

/// Key used for missing positional parameters.
pub const POSITIONAL_KEY: &str = "";

/// An error together with the place it was found, if it has one.
#[derive(Debug)]
pub struct LocatedError {
    pub error: ParamError,
    pub location: Option<SourceLocation>,
}

impl LocatedError {
    pub fn new(error: ParamError, location: Option<SourceLocation>) -> Self {
        Self { error, location }
    }

    pub fn at(error: ParamError, location: &SourceLocation) -> Self {
        Self::new(error, Some(location.clone()))
    }
}

impl fmt::Display for LocatedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        if let Some(loc) = &self.location {
            write!(f, "\n\tat: {loc}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct ErrorMap {
    entries: BTreeMap<String, Vec<LocatedError>>,
}

#[derive(Serialize)]
struct ErrorRecord<'a> {
    key: &'a str,
    kind: &'static str,
    message: String,
    location: Option<&'a SourceLocation>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an error under `key`.
    pub fn record(&mut self, key: impl Into<String>, error: LocatedError) {
        self.entries.entry(key.into()).or_default().push(error);
    }

    /// Append several errors under `key`, keeping their order.
    pub fn record_all(
        &mut self,
        key: impl Into<String>,
        errors: impl IntoIterator<Item = LocatedError>,
    ) {
        let errors: Vec<LocatedError> = errors.into_iter().collect();
        if errors.is_empty() {
            return;
        }
        self.entries.entry(key.into()).or_default().extend(errors);
    }

    /// Errors recorded under `key`, or `None` if there are none.
    pub fn get(&self, key: &str) -> Option<&[LocatedError]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct keys with errors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Total number of errors across all keys.
    pub fn error_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// All entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[LocatedError])> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Human-readable listing of every error, grouped by key.
    pub fn report(&self) -> String {
        self.to_string()
    }

    /// Every error as a JSON array of `{key, kind, message, location}` records.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let records: Vec<ErrorRecord<'_>> = self
            .iter()
            .flat_map(|(key, errs)| {
                errs.iter().map(move |e| ErrorRecord {
                    key,
                    kind: e.error.kind(),
                    message: e.error.to_string(),
                    location: e.location.as_ref(),
                })
            })
            .collect();
        serde_json::to_string_pretty(&records)
    }
}

impl fmt::Display for ErrorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, errs)) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let label = if key == POSITIONAL_KEY {
                "positional parameters"
            } else {
                key
            };
            write!(f, "{label}:")?;
            for err in errs {
                let text = err.to_string().replace('\n', "\n\t");
                write!(f, "\n\t{text}")?;
            }
        }
        Ok(())
    }
}
