//! Formula input: shorthand substitution, tokenizer and parser
//!
//! `parse_formula_input` is the single entry point from raw text to a
//! `ParsedFormula`. It never fails; syntax problems become the `Error` or
//! `Incomplete` variants.

pub mod grammar;
pub mod substitutions;
pub mod tokenizer;


pub use grammar::{parse_formula, Parser};
pub use substitutions::{replace_substitutions, SHORTHANDS};
pub use tokenizer::{tokenize, Token};

use crate::logic::Formula;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Outcome of parsing one line of user input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ParsedFormula {
    Ok {
        formula: Formula,
    },
    /// Blank input. Not an error.
    #[default]
    Empty,
    Error {
        error: String,
    },
    /// A valid prefix; the user is probably still typing
    Incomplete {
        error: String,
    },
}

impl ParsedFormula {
    pub fn status(&self) -> &'static str {
        match self {
            ParsedFormula::Ok { .. } => "ok",
            ParsedFormula::Empty => "empty",
            ParsedFormula::Error { .. } => "error",
            ParsedFormula::Incomplete { .. } => "incomplete",
        }
    }

    pub fn formula(&self) -> Option<&Formula> {
        match self {
            ParsedFormula::Ok { formula } => Some(formula),
            _ => None,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ParsedFormula::Ok { .. })
    }

    /// Message to show the user, if any. Incomplete input stays quiet.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            ParsedFormula::Error { error } => Some(error),
            _ => None,
        }
    }
}

pub fn parse_formula_input(raw: &str) -> ParsedFormula {
    if raw.trim().is_empty() {
        return ParsedFormula::Empty;
    }

    let parsed = match parse_formula(raw) {
        Ok(formula) => ParsedFormula::Ok { formula },
        Err(e) if e.is_incomplete() => ParsedFormula::Incomplete {
            error: e.to_string(),
        },
        Err(e) => ParsedFormula::Error {
            error: e.to_string(),
        },
    };
    trace!(raw, status = parsed.status(), "parsed formula input");
    parsed
}
