//! The setter capability and the stock setters built on it.
//!
//! A [`Setter`] validates an incoming value and stores it somewhere the owning
//! program can read it back. The stock setters store into a [`Slot`], a cheap
//! shared cell the program keeps a clone of:
//!
//! ```ignore
//! let count = Slot::new(0i64);
//! let param = Param::new("count", setter::Int::new(&count), "how many");
//! // ... resolve ...
//! println!("{}", count.get());
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use crate::check::Check;
use crate::types::ValueReq;

/// A setter rejected the value it was given.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Validates and stores the value for one parameter.
///
/// `set` receives `None` when the parameter appeared without a value
/// (`--flag`, or a config line with no `=`).
pub trait Setter {
    fn value_req(&self) -> ValueReq;
    fn set(&self, value: Option<&str>) -> Result<(), ValidationError>;
    /// Description of acceptable values, for help text.
    fn allowed_values(&self) -> String;
    /// The value currently stored, rendered as text.
    fn current_value(&self) -> String;
}

/// Shared storage for a parameter value.
///
/// Clones share the same value.
pub struct Slot<T>(Rc<RefCell<T>>);

impl<T> Slot<T> {
    pub fn new(initial: T) -> Self {
        Self(Rc::new(RefCell::new(initial)))
    }

    pub fn set(&self, value: T) {
        *self.0.borrow_mut() = value;
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.borrow())
    }
}

impl<T: Clone> Slot<T> {
    pub fn get(&self) -> T {
        self.0.borrow().clone()
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Slot").field(&self.0.borrow()).finish()
    }
}

impl<T: Default> Default for Slot<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

fn run_checks<T>(checks: &[Check<T>], v: &T) -> Result<(), ValidationError> {
    for check in checks {
        check(v).map_err(ValidationError)?;
    }
    Ok(())
}

/// A flag. Given alone it stores `true`; it also accepts an explicit
/// boolean value (`true`/`false`, `t`/`f`, `1`/`0`, any case).
pub struct Bool {
    value: Slot<bool>,
}

impl Bool {
    pub fn new(value: &Slot<bool>) -> Self {
        Self {
            value: value.clone(),
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    const TRUE: &[&str] = &["true", "t", "1"];
    const FALSE: &[&str] = &["false", "f", "0"];
    if TRUE.iter().any(|t| s.eq_ignore_ascii_case(t)) {
        Some(true)
    } else if FALSE.iter().any(|f| s.eq_ignore_ascii_case(f)) {
        Some(false)
    } else {
        None
    }
}

impl Setter for Bool {
    fn value_req(&self) -> ValueReq {
        ValueReq::Optional
    }

    fn set(&self, value: Option<&str>) -> Result<(), ValidationError> {
        let v = match value {
            None => true,
            Some(s) => parse_bool(s).ok_or_else(|| {
                ValidationError::new(format!("could not interpret '{s}' as either true or false"))
            })?,
        };
        self.value.set(v);
        Ok(())
    }

    fn allowed_values(&self) -> String {
        "none (which will be taken as 'true') or some value that can be \
         interpreted as true or false"
            .into()
    }

    fn current_value(&self) -> String {
        self.value.get().to_string()
    }
}

/// A parameter that takes no value and stores nothing. Useful when the
/// parameter exists only for its actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoValue;

impl Setter for NoValue {
    fn value_req(&self) -> ValueReq {
        ValueReq::None
    }

    fn set(&self, value: Option<&str>) -> Result<(), ValidationError> {
        match value {
            None => Ok(()),
            Some(v) => Err(ValidationError::new(format!(
                "a value ('{v}') was given but this parameter takes none"
            ))),
        }
    }

    fn allowed_values(&self) -> String {
        "none".into()
    }

    fn current_value(&self) -> String {
        String::new()
    }
}

/// A whole number (`i64`), with optional checks.
pub struct Int {
    value: Slot<i64>,
    checks: Vec<Check<i64>>,
}

impl Int {
    pub fn new(value: &Slot<i64>) -> Self {
        Self {
            value: value.clone(),
            checks: Vec::new(),
        }
    }

    pub fn check(mut self, check: Check<i64>) -> Self {
        self.checks.push(check);
        self
    }
}

impl Setter for Int {
    fn value_req(&self) -> ValueReq {
        ValueReq::Mandatory
    }

    fn set(&self, value: Option<&str>) -> Result<(), ValidationError> {
        let s = value
            .ok_or_else(|| ValidationError::new("no number given (it should be followed by '=num')"))?;
        let v: i64 = s.parse().map_err(|e| {
            ValidationError::new(format!("could not parse '{s}' as an integer value: {e}"))
        })?;
        run_checks(&self.checks, &v)?;
        self.value.set(v);
        Ok(())
    }

    fn allowed_values(&self) -> String {
        let mut s = String::from("any value that can be read as a whole number");
        if !self.checks.is_empty() {
            s.push_str(" subject to checks");
        }
        s
    }

    fn current_value(&self) -> String {
        self.value.get().to_string()
    }
}

/// A floating point number (`f64`), with optional checks.
pub struct Float {
    value: Slot<f64>,
    checks: Vec<Check<f64>>,
}

impl Float {
    pub fn new(value: &Slot<f64>) -> Self {
        Self {
            value: value.clone(),
            checks: Vec::new(),
        }
    }

    pub fn check(mut self, check: Check<f64>) -> Self {
        self.checks.push(check);
        self
    }
}

impl Setter for Float {
    fn value_req(&self) -> ValueReq {
        ValueReq::Mandatory
    }

    fn set(&self, value: Option<&str>) -> Result<(), ValidationError> {
        let s = value
            .ok_or_else(|| ValidationError::new("no number given (it should be followed by '=num')"))?;
        let v: f64 = s.parse().map_err(|e| {
            ValidationError::new(format!("could not parse '{s}' as a float value: {e}"))
        })?;
        run_checks(&self.checks, &v)?;
        self.value.set(v);
        Ok(())
    }

    fn allowed_values(&self) -> String {
        let mut s = String::from("any value that can be read as a number with a decimal place");
        if !self.checks.is_empty() {
            s.push_str(" subject to checks");
        }
        s
    }

    fn current_value(&self) -> String {
        self.value.get().to_string()
    }
}

/// Free text, with optional checks.
pub struct Str {
    value: Slot<String>,
    checks: Vec<Check<String>>,
}

impl Str {
    pub fn new(value: &Slot<String>) -> Self {
        Self {
            value: value.clone(),
            checks: Vec::new(),
        }
    }

    pub fn check(mut self, check: Check<String>) -> Self {
        self.checks.push(check);
        self
    }
}

impl Setter for Str {
    fn value_req(&self) -> ValueReq {
        ValueReq::Mandatory
    }

    fn set(&self, value: Option<&str>) -> Result<(), ValidationError> {
        let s = value
            .ok_or_else(|| ValidationError::new("no value given (it should be followed by '=...')"))?
            .to_string();
        run_checks(&self.checks, &s)?;
        self.value.set(s);
        Ok(())
    }

    fn allowed_values(&self) -> String {
        let mut s = String::from("any string");
        if !self.checks.is_empty() {
            s.push_str(" subject to checks");
        }
        s
    }

    fn current_value(&self) -> String {
        self.value.get()
    }
}

/// One of a fixed set of words.
pub struct Enum {
    value: Slot<String>,
    allowed: Vec<String>,
}

impl Enum {
    pub fn new<I, S>(value: &Slot<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            value: value.clone(),
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }
}

impl Setter for Enum {
    fn value_req(&self) -> ValueReq {
        ValueReq::Mandatory
    }

    fn set(&self, value: Option<&str>) -> Result<(), ValidationError> {
        let s = value.ok_or_else(|| {
            ValidationError::new("no value given (it should be followed by '=...')")
        })?;
        if !self.allowed.iter().any(|a| a == s) {
            return Err(ValidationError::new(format!(
                "invalid value: '{s}' - the value must be one of: {}",
                self.allowed.join(", ")
            )));
        }
        self.value.set(s.to_string());
        Ok(())
    }

    fn allowed_values(&self) -> String {
        format!("one of: {}", self.allowed.join(", "))
    }

    fn current_value(&self) -> String {
        self.value.get()
    }
}
