use std::fmt;

use serde::Serialize;

/// Where a value came from: a source name (a file path or "command line"),
/// a 1-based sequence number within that source, and the raw text seen there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub source: String,
    pub line: usize,
    pub content: String,
}

impl SourceLocation {
    /// A location positioned before the first item of `source`.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            line: 0,
            content: String::new(),
        }
    }

    /// Advance to the next item. The counter only ever increases.
    pub fn incr(&mut self) {
        self.line += 1;
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source, self.line)?;
        if !self.content.is_empty() {
            write!(f, ": {}", self.content)?;
        }
        Ok(())
    }
}
