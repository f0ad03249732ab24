//! Value checks applied by setters after a value has been parsed.
//!
//! A check returns `Err` with a user-facing message when the value is not
//! acceptable; the setter reports it as the parameter's validation error.

use std::fmt::Display;

/// A check on a parsed value of type `T`.
pub type Check<T> = Box<dyn Fn(&T) -> Result<(), String>>;

pub fn gt<T: PartialOrd + Display + 'static>(limit: T) -> Check<T> {
    Box::new(move |v| {
        if *v > limit {
            Ok(())
        } else {
            Err(format!("the value ({v}) must be greater than {limit}"))
        }
    })
}

pub fn ge<T: PartialOrd + Display + 'static>(limit: T) -> Check<T> {
    Box::new(move |v| {
        if *v >= limit {
            Ok(())
        } else {
            Err(format!("the value ({v}) must be greater than or equal to {limit}"))
        }
    })
}

pub fn lt<T: PartialOrd + Display + 'static>(limit: T) -> Check<T> {
    Box::new(move |v| {
        if *v < limit {
            Ok(())
        } else {
            Err(format!("the value ({v}) must be less than {limit}"))
        }
    })
}

pub fn le<T: PartialOrd + Display + 'static>(limit: T) -> Check<T> {
    Box::new(move |v| {
        if *v <= limit {
            Ok(())
        } else {
            Err(format!("the value ({v}) must be less than or equal to {limit}"))
        }
    })
}

/// Inclusive range check.
///
/// # Panics
///
/// Panics if `low >= high`; such a range can never be satisfied.
pub fn between<T: PartialOrd + Display + 'static>(low: T, high: T) -> Check<T> {
    if low >= high {
        panic!(
            "impossible range passed to check::between: \
             the lower limit ({low}) should be less than the upper limit ({high})"
        );
    }
    Box::new(move |v| {
        if *v < low {
            Err(format!("the value ({v}) must be between {low} and {high} - too small"))
        } else if *v > high {
            Err(format!("the value ({v}) must be between {low} and {high} - too big"))
        } else {
            Ok(())
        }
    })
}

pub fn len_eq(limit: usize) -> Check<String> {
    Box::new(move |s| {
        let len = s.chars().count();
        if len == limit {
            Ok(())
        } else {
            Err(format!("the length of the value ({len}) must equal {limit}"))
        }
    })
}

pub fn len_lt(limit: usize) -> Check<String> {
    Box::new(move |s| {
        let len = s.chars().count();
        if len < limit {
            Ok(())
        } else {
            Err(format!("the length of the value ({len}) must be less than {limit}"))
        }
    })
}

pub fn len_gt(limit: usize) -> Check<String> {
    Box::new(move |s| {
        let len = s.chars().count();
        if len > limit {
            Ok(())
        } else {
            Err(format!("the length of the value ({len}) must be greater than {limit}"))
        }
    })
}

/// # Panics
///
/// Panics if `low >= high`.
pub fn len_between(low: usize, high: usize) -> Check<String> {
    if low >= high {
        panic!(
            "impossible range passed to check::len_between: \
             the lower limit ({low}) should be less than the upper limit ({high})"
        );
    }
    Box::new(move |s| {
        let len = s.chars().count();
        if len < low {
            Err(format!(
                "the length of the value ({len}) must be between {low} and {high} - too short"
            ))
        } else if len > high {
            Err(format!(
                "the length of the value ({len}) must be between {low} and {high} - too long"
            ))
        } else {
            Ok(())
        }
    })
}

/// Passes if any one of `checks` passes; otherwise reports all their failures.
pub fn any_of<T: 'static>(checks: Vec<Check<T>>) -> Check<T> {
    Box::new(move |v| {
        let mut failures = Vec::with_capacity(checks.len());
        for check in &checks {
            match check(v) {
                Ok(()) => return Ok(()),
                Err(e) => failures.push(e),
            }
        }
        Err(format!("({})", failures.join(" OR ")))
    })
}
