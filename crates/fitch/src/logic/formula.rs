//! Formula AST
//!
//! Formulas are built by the parser from user input and embedded in the
//! lines of a proof. The printer below emits canonical symbols with every
//! binary and quantified subformula parenthesized, so its output parses back
//! to an equal tree.

use super::term::{Term, Variable};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Quantifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quantifier {
    Forall,
    Exists,
}

impl Quantifier {
    pub fn symbol(self) -> char {
        match self {
            Quantifier::Forall => '∀',
            Quantifier::Exists => '∃',
        }
    }
}

/// A predicate applied to terms; zero arguments makes a propositional atom
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Predicate {
    pub name: String,
    pub args: Vec<Term>,
}

impl Predicate {
    pub fn atom(name: impl Into<String>) -> Self {
        Predicate {
            name: name.into(),
            args: vec![],
        }
    }

    pub fn new(name: impl Into<String>, args: Vec<Term>) -> Self {
        Predicate {
            name: name.into(),
            args,
        }
    }
}

/// First-order formula
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Formula {
    Predicate(Predicate),
    Not {
        operand: Box<Formula>,
    },
    And {
        left: Box<Formula>,
        right: Box<Formula>,
    },
    Or {
        left: Box<Formula>,
        right: Box<Formula>,
    },
    Implies {
        left: Box<Formula>,
        right: Box<Formula>,
    },
    Iff {
        left: Box<Formula>,
        right: Box<Formula>,
    },
    /// Falsity
    Bottom,
    Forall {
        variable: Variable,
        body: Box<Formula>,
    },
    Exists {
        variable: Variable,
        body: Box<Formula>,
    },
}

/// The four binary connectives, used by the parser's precedence table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    And,
    Or,
    Implies,
    Iff,
}

impl Connective {
    pub fn symbol(self) -> char {
        match self {
            Connective::And => '∧',
            Connective::Or => '∨',
            Connective::Implies => '→',
            Connective::Iff => '↔',
        }
    }
}

impl Formula {
    pub fn atom(name: impl Into<String>) -> Self {
        Formula::Predicate(Predicate::atom(name))
    }

    pub fn not(operand: Formula) -> Self {
        Formula::Not {
            operand: Box::new(operand),
        }
    }

    pub fn binary(connective: Connective, left: Formula, right: Formula) -> Self {
        let (left, right) = (Box::new(left), Box::new(right));
        match connective {
            Connective::And => Formula::And { left, right },
            Connective::Or => Formula::Or { left, right },
            Connective::Implies => Formula::Implies { left, right },
            Connective::Iff => Formula::Iff { left, right },
        }
    }

    pub fn quantified(quantifier: Quantifier, variable: Variable, body: Formula) -> Self {
        let body = Box::new(body);
        match quantifier {
            Quantifier::Forall => Formula::Forall { variable, body },
            Quantifier::Exists => Formula::Exists { variable, body },
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if self.args.is_empty() {
            return Ok(());
        }
        write!(f, "(")?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Predicate(p) => write!(f, "{}", p),
            Formula::Bottom => write!(f, "⊥"),
            Formula::Not { operand } => write!(f, "¬{}", operand),
            Formula::Forall { variable, body } => write!(f, "(∀{} {})", variable, body),
            Formula::Exists { variable, body } => write!(f, "(∃{} {})", variable, body),
            Formula::And { left, right } => write!(f, "({} ∧ {})", left, right),
            Formula::Or { left, right } => write!(f, "({} ∨ {})", left, right),
            Formula::Implies { left, right } => write!(f, "({} → {})", left, right),
            Formula::Iff { left, right } => write!(f, "({} ↔ {})", left, right),
        }
    }
}
