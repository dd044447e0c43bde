//! Proof tree: premises, steps, nested subproofs and goals
//!
//! This module provides:
//! - the tree types and stable node ids (`model`)
//! - hierarchical addresses (`step_id`)
//! - the numbering pass (`numbering`)
//! - structural and text edits (`edit`)
//! - an editing session that applies shorthand substitution (`session`)

pub mod edit;
pub mod model;
pub mod numbering;
pub mod session;
pub mod step_id;


pub use model::{EntityRef, Goal, LineMut, NodeId, Premise, Proof, Statement, Step, Subproof, NO_RULE};
pub use numbering::number;
pub use session::ProofSession;
pub use step_id::{InvalidStepId, StepId};
