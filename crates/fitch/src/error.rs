//! Error types for the fitch core

use crate::proof::NodeId;
use thiserror::Error;

/// Syntax failures raised inside the formula parser.
///
/// These never leave the parse boundary: `parse_formula_input` folds them
/// into a `ParsedFormula`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unexpected end of input")]
    UnexpectedEnd,

    #[error("Unexpected token: {0}")]
    UnexpectedToken(String),

    #[error("Expected symbol '{expected}', got '{found}'")]
    ExpectedSymbol { expected: char, found: String },

    #[error("Expected term identifier")]
    ExpectedTerm,

    #[error("Expected a single lowercase variable after quantifier, got '{0}'")]
    ExpectedVariable(String),

    #[error("Unexpected input after formula")]
    TrailingInput,

    #[error("Formula is nested too deeply")]
    TooDeep,
}

impl ParseError {
    /// The input ran out while a formula was still open, so it may still be
    /// completed by further typing.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, ParseError::UnexpectedEnd)
    }
}

/// Failures while building the verifier payload. Any of these aborts the
/// whole conversion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("Formula on line {id} is not valid ({status})")]
    InvalidFormula { id: String, status: &'static str },

    #[error("Line {id} has no known rule: '{rule}'")]
    UnmappedRule { id: String, rule: String },

    #[error("Proof has not been numbered")]
    Unnumbered,

    #[error("Line {id} cites a line that no longer exists")]
    DanglingReference { id: String, target: NodeId },

    #[error("Line {id} cites line {cited}, which does not come before it")]
    ForwardReference { id: String, cited: String },

    #[error("Goal {id} does not cite a line")]
    MissingGoalParent { id: String },
}

/// Failures of structural and text edits on a proof.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("No entity with id {0}")]
    UnknownNode(NodeId),

    #[error("Scope path {0:?} does not name a subproof")]
    InvalidScope(Vec<usize>),

    #[error("Index {index} out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Malformed line address: '{0}'")]
    InvalidAddress(String),

    #[error("No line with address {0}")]
    UnknownAddress(String),

    #[error("Entity {0} is not an inference line")]
    NotAStatement(NodeId),

    #[error("Entity {0} is not a goal")]
    NotAGoal(NodeId),

    #[error("Subproof assumptions are justified by scope entry and take no rule or citations")]
    AssumptionRule,
}

/// Configuration loading failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("verifier.max_suggestions must be at least 1")]
    NoSuggestions,
}

/// Failures while talking to the external verifier.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Cannot build verifier payload: {0}")]
    Convert(#[from] ConvertError),

    #[error("Malformed verifier message: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Verifier unreachable: {0}")]
    Transport(String),

    #[error("Unexpected verifier status {0}")]
    UnexpectedStatus(u16),
}
