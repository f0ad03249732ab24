//! Resolve a program's parameters from config files and the command line,
//! reporting every problem at once.
//!
//! Paramfig takes a set of declared parameters, reads any number of config
//! files, then parses the command-line arguments, storing values through
//! each parameter's setter. Problems are collected per parameter rather than
//! stopping at the first one, and unknown names on the command line come with
//! a suggestion of the closest known name.
//!
//! ```ignore
//! let count = Slot::new(1i64);
//! let verbose = Slot::new(false);
//!
//! let registry = ParamSet::builder()
//!     .prog_name("myprog")
//!     .add(Param::new("count", setter::Int::new(&count), "how many").alt_name("c"))
//!     .add(Param::new("verbose", setter::Bool::new(&verbose), "say more"))
//!     .add_config_file("/etc/myprog.cfg", Exists::Optional)
//!     .add_config_file("~/.myprog.cfg", Exists::Optional)
//!     .build()?;
//!
//! let resolution = registry.parse_env();
//! if resolution.has_errors() {
//!     eprintln!("{}", resolution.errors().report());
//!     std::process::exit(1);
//! }
//! ```
//!
//! # Precedence
//!
//! ```text
//! Group config files    each group's files, in the order added
//!        ↑ overridden by
//! Global config files   in the order added
//!        ↑ overridden by
//! Command line          positional, then named arguments
//! ```
//!
//! There is no merging step: every source writes straight through the
//! setter, so the last value written wins.
//!
//! # Command line
//!
//! The first N arguments bind to the N positional parameters, in order. If
//! there are fewer than N arguments, a single "missing parameters" error is
//! recorded and nothing else on the command line is looked at. A positional
//! parameter marked [`terminal`](Param::terminal) stops parsing after its
//! value; the rest of the arguments become the
//! [`remainder`](Resolution::remainder).
//!
//! Remaining arguments are `--name`, `-name`, `--name=value` or
//! `-name=value`. A parameter whose setter requires a value takes the next
//! argument when no `=value` is given. The terminal token (`--` unless
//! changed with [`terminal_param`](ParamSetBuilder::terminal_param)) stops
//! parsing, leaving what follows as the remainder.
//!
//! # Config files
//!
//! One `name = value` (or bare `name`) per line. A `#` at the start of a line
//! or after whitespace starts a comment. A line written `prog/name = value`
//! applies only to the program called `prog`, so one file can serve several
//! programs. See the [`file`] module for the full
//! rules, including how group files differ from global ones.
//!
//! # Errors
//!
//! A resolution pass never stops at the first problem. Everything found goes
//! into the pass's [`ErrorMap`], keyed by the parameter's canonical name, by
//! `"config file: <path>"` for files that could not be read, or by the empty
//! key for missing positional arguments. [`ErrorMap::report`] renders them
//! for the user; [`ErrorMap::to_json`] renders them for tools.
//!
//! Mistakes in the declarations themselves are different. Duplicate names
//! are returned from [`ParamSetBuilder::build`] as a [`DefinitionError`];
//! registering a config file with [`Exists::MustNotExist`] panics.
//!
//! # Setters
//!
//! Anything implementing [`Setter`] can store a parameter's value. The
//! [`setter`] module has stock setters for flags, integers, floats, strings
//! and fixed word lists, each writing into a shared [`Slot`] and optionally
//! running [`check`]s on the parsed value, plus `NoValue` for parameters
//! that exist only for their actions.

pub mod action;
pub mod check;
pub mod distance;
pub mod error;
pub mod file;
pub mod lines;
pub mod setter;
pub mod suggest;
pub mod types;

mod builder;
mod cmdline;
mod errmap;
mod location;
mod param;
mod registry;
mod resolve;

#[cfg(test)]
mod fixtures;

pub use builder::{DEFAULT_TERMINAL_PARAM, ParamSet, ParamSetBuilder};
pub use cmdline::SOURCE as COMMAND_LINE_SOURCE;
pub use errmap::{ErrorMap, LocatedError, POSITIONAL_KEY};
pub use error::{DefinitionError, ParamError};
pub use location::SourceLocation;
pub use param::Param;
pub use registry::Registry;
pub use resolve::Resolution;
pub use setter::{Setter, Slot, ValidationError};
pub use suggest::Suggestion;
pub use types::{ConfigFile, Exists, ValueReq};
