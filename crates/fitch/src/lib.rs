//! Fitch: the editing core of a Fitch-style natural deduction proof editor
//!
//! This library parses formula input, keeps a tree of premises, steps,
//! nested subproofs and goals numbered hierarchically, and converts the tree
//! into the JSON document an external verifier checks.

pub mod api;
pub mod config;
pub mod convert;
pub mod error;
pub mod logic;
pub mod parser;
pub mod proof;
pub mod rules;

// Re-export the formula types
pub use logic::{Connective, Constant, Formula, Predicate, Quantifier, Term, Variable};

// Re-export parser entry points
pub use parser::{parse_formula, parse_formula_input, replace_substitutions, ParsedFormula};

// Re-export the proof tree and its editing session
pub use proof::{
    number, EntityRef, Goal, NodeId, Premise, Proof, ProofSession, Statement, Step, StepId,
    Subproof, NO_RULE,
};

pub use api::{check_proof, locate_failure, Endpoint, VerificationOutcome, Verifier};
pub use config::{FitchConfig, VerifierConfig};
pub use convert::{convert, convert_with, ConvertedProof};
pub use error::{ApiError, ConfigError, ConvertError, EditError, ParseError};
pub use rules::{Rule, RuleBook};
