//! Line-oriented file reading.
//!
//! [`FileParser`] opens a file, strips `#` comments and surrounding
//! whitespace, skips blank lines, and hands each remaining line to a
//! [`LineParser`] together with its location. A `#` only starts a comment at
//! the beginning of a line or after whitespace, so `color = a#b` keeps its
//! value. Bytes that are not valid UTF-8 are replaced, not fatal. A file that cannot be opened
//! yields a single [`ParamError::FileAccess`], so callers can tell "absent"
//! apart from "broken".

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::ParamError;
use crate::location::SourceLocation;

pub trait LineParser {
    fn parse_line(&mut self, line: &str, location: &SourceLocation) -> Result<(), ParamError>;
}

/// Counters for the most recent [`FileParser::parse`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub files_visited: usize,
    pub lines_read: usize,
    pub lines_parsed: usize,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "files: {:3} lines read: {:5} parsed: {:5}",
            self.files_visited, self.lines_read, self.lines_parsed
        )
    }
}

#[derive(Debug, Default)]
pub struct FileParser {
    stats: Stats,
}

impl FileParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Parse `path` line by line, returning every error encountered.
    pub fn parse(&mut self, path: &Path, parser: &mut dyn LineParser) -> Vec<ParamError> {
        self.stats = Stats::default();

        let file = match File::open(path) {
            Ok(f) => f,
            Err(source) => {
                return vec![ParamError::FileAccess {
                    path: path.to_path_buf(),
                    source,
                }];
            }
        };
        self.stats.files_visited += 1;

        let mut errors = Vec::new();
        let mut loc = SourceLocation::new(path.display().to_string());
        let mut reader = BufReader::new(file);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(source) => {
                    errors.push(ParamError::FileRead {
                        path: path.to_path_buf(),
                        source,
                    });
                    break;
                }
            }
            self.stats.lines_read += 1;
            loc.incr();

            // Invalid UTF-8 is replaced rather than dropping the line.
            let decoded = String::from_utf8_lossy(&buf);
            let raw = decoded.trim_end_matches(['\n', '\r']);
            let content = strip_comment(raw).trim();
            if content.is_empty() {
                continue;
            }
            loc.set_content(raw);
            self.stats.lines_parsed += 1;

            if let Err(e) = parser.parse_line(content, &loc) {
                errors.push(e);
            }
        }
        errors
    }
}

/// Cut the line at a `#` that starts it or follows whitespace. A `#` inside
/// a word is kept.
fn strip_comment(line: &str) -> &str {
    let mut prev_ws = true;
    for (idx, c) in line.char_indices() {
        if c == '#' && prev_ws {
            return &line[..idx];
        }
        prev_ws = c.is_whitespace();
    }
    line
}
