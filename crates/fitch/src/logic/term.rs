//! Terms in first-order logic

use serde::{Deserialize, Serialize};
use std::fmt;

/// A variable, bound by a quantifier or free
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
}

/// A constant symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Constant {
    pub name: String,
}

/// A term in first-order logic
///
/// Identity is structural: two terms with the same kind and name are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Term {
    Constant(Constant),
    Variable(Variable),
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Variable { name: name.into() }
    }
}

impl Constant {
    pub fn new(name: impl Into<String>) -> Self {
        Constant { name: name.into() }
    }
}

impl Term {
    /// Classify an argument identifier by naming convention: a single
    /// lowercase ASCII letter is a variable, anything else a constant.
    pub fn from_identifier(name: &str) -> Self {
        if is_variable_name(name) {
            Term::Variable(Variable::new(name))
        } else {
            Term::Constant(Constant::new(name))
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Term::Constant(c) => &c.name,
            Term::Variable(v) => &v.name,
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }
}

/// True for identifiers that may be bound by a quantifier.
pub fn is_variable_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_lowercase())
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(v) => write!(f, "{}", v),
            Term::Constant(c) => write!(f, "{}", c),
        }
    }
}
