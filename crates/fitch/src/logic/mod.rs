//! First-order logic data structures
//!
//! Terms, predicates and the formula AST produced by the parser.

pub mod formula;
pub mod term;

pub use formula::{Connective, Formula, Predicate, Quantifier};
pub use term::{is_variable_name, Constant, Term, Variable};
