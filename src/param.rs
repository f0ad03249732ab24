use std::fmt;

use crate::action::{Action, ActionContext};
use crate::error::ParamError;
use crate::location::SourceLocation;
use crate::setter::Setter;
use crate::types::ValueReq;

/// A declared parameter.
///
/// Named parameters are matched by `--name`, `-name` or any alternative name,
/// on the command line and in config files. Positional parameters (added
/// with [`ParamSetBuilder::add_positional`](crate::ParamSetBuilder::add_positional))
/// are bound by order on the command line only.
pub struct Param {
    name: String,
    alt_names: Vec<String>,
    group: Option<String>,
    description: String,
    setter: Box<dyn Setter>,
    terminal: bool,
    actions: Vec<Action>,
    pub(crate) position: Option<usize>,
}

impl Param {
    pub fn new(name: &str, setter: impl Setter + 'static, description: &str) -> Self {
        Self {
            name: name.to_string(),
            alt_names: Vec::new(),
            group: None,
            description: description.to_string(),
            setter: Box::new(setter),
            terminal: false,
            actions: Vec::new(),
            position: None,
        }
    }

    /// Add another name that refers to this parameter.
    pub fn alt_name(mut self, name: &str) -> Self {
        self.alt_names.push(name.to_string());
        self
    }

    /// Place the parameter in a named group. An empty name means no group.
    pub fn group(mut self, group: &str) -> Self {
        self.group = (!group.is_empty()).then(|| group.to_string());
        self
    }

    /// Run `action` after each successful set.
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// For positional parameters: everything after this one's value is left
    /// unparsed, as the remainder.
    pub fn terminal(mut self) -> Self {
        self.terminal = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alt_names(&self) -> &[String] {
        &self.alt_names
    }

    pub fn group_name(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn value_req(&self) -> ValueReq {
        self.setter.value_req()
    }

    pub fn setter(&self) -> &dyn Setter {
        self.setter.as_ref()
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Zero-based position for positional parameters.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub(crate) fn all_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.alt_names.iter().map(String::as_str))
    }

    /// Hand `value` to the setter, then run any actions.
    pub(crate) fn process(
        &self,
        location: &SourceLocation,
        value: Option<&str>,
    ) -> Result<(), ParamError> {
        self.setter
            .set(value)
            .map_err(|e| ParamError::InvalidValue {
                name: self.name.clone(),
                reason: e.0,
            })?;
        tracing::trace!(param = %self.name, %location, "parameter set");

        let ctx = ActionContext {
            name: &self.name,
            location,
            value,
        };
        for action in &self.actions {
            action(&ctx).map_err(|reason| ParamError::ActionFailed {
                name: self.name.clone(),
                reason,
            })?;
        }
        Ok(())
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Param")
            .field("name", &self.name)
            .field("alt_names", &self.alt_names)
            .field("group", &self.group)
            .field("value_req", &self.value_req())
            .field("position", &self.position)
            .field("terminal", &self.terminal)
            .finish_non_exhaustive()
    }
}
