//! Named symbols.

use std::collections::HashMap;
use std::fmt;

use crate::error::{FuncError, Result};

const ALL_NAME: &str = "*";
const FREE_NAME: &str = "x";

/// Numeric values bound to variables for evaluation.
pub type Bindings = HashMap<Variable, f64>;

/// An immutable named symbol. Equality, ordering and hashing go through the name only.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Variable {
    name: String,
}

impl Variable {
    /// Builds a variable, rejecting empty or digit-leading names.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_name(&name, "variable")?;
        Ok(Variable { name })
    }

    /// The sentinel standing for "the whole real line" on constant functions.
    pub fn all() -> Self {
        Variable {
            name: ALL_NAME.to_string(),
        }
    }

    /// `x`, used where a constant must gain a variable.
    pub fn default_free() -> Self {
        Variable {
            name: FREE_NAME.to_string(),
        }
    }

    pub fn is_all(&self) -> bool {
        self.name == ALL_NAME
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_all() {
            write!(f, "ℝ")
        } else {
            write!(f, "{}", self.name)
        }
    }
}

pub(crate) fn validate_name(name: &str, what: &str) -> Result<()> {
    match name.chars().next() {
        None => Err(FuncError::invalid(format!("{what} name must not be empty"))),
        Some(c) if c.is_ascii_digit() => Err(FuncError::invalid(format!(
            "{what} name `{name}` must not start with a digit"
        ))),
        Some(_) if name.chars().any(char::is_whitespace) => Err(FuncError::invalid(format!(
            "{what} name `{name}` must not contain whitespace"
        ))),
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_validated() {
        assert!(Variable::new("x").is_ok());
        assert!(Variable::new("").is_err());
        assert!(Variable::new("2x").is_err());
    }

    #[test]
    fn equality_is_by_name() {
        assert_eq!(Variable::new("t").unwrap(), Variable::new("t").unwrap());
        assert_ne!(Variable::new("t").unwrap(), Variable::all());
        assert!(Variable::all().is_all());
    }
}
