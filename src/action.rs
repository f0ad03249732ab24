//! Actions run after a parameter has been set successfully.

use std::cell::RefCell;
use std::rc::Rc;

use crate::location::SourceLocation;

/// What an action is told about the set that triggered it.
#[derive(Debug, Clone, Copy)]
pub struct ActionContext<'a> {
    /// Canonical name of the parameter.
    pub name: &'a str,
    pub location: &'a SourceLocation,
    pub value: Option<&'a str>,
}

/// An action. An `Err` is recorded against the parameter as an action failure.
pub type Action = Box<dyn Fn(&ActionContext<'_>) -> Result<(), String>>;

/// Counts how many distinct parameters have been set, and where.
///
/// Attach [`Counter::action`] to a set of mutually exclusive parameters and
/// check [`Counter::count`] after resolution.
#[derive(Debug, Clone, Default)]
pub struct Counter {
    seen: Rc<RefCell<Vec<(String, SourceLocation)>>>,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn action(&self) -> Action {
        let seen = Rc::clone(&self.seen);
        Box::new(move |ctx| {
            seen.borrow_mut()
                .push((ctx.name.to_string(), ctx.location.clone()));
            Ok(())
        })
    }

    /// Number of distinct parameters set.
    pub fn count(&self) -> usize {
        let seen = self.seen.borrow();
        let mut names: Vec<&str> = seen.iter().map(|(n, _)| n.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names.len()
    }

    /// One line per set, in order: `Param: <name> (at <location>)`.
    pub fn set_by(&self) -> Vec<String> {
        self.seen
            .borrow()
            .iter()
            .map(|(name, loc)| format!("Param: {name} (at {loc})"))
            .collect()
    }
}
