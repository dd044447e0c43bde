//! Line numbering
//!
//! One running counter covers premises, then top-level steps, then goals.
//! Inside a subproof numbered `n`, the assumption is `n.1` and the body
//! lines are `n.2`, `n.3`, ... Deeper subproofs extend the address the same
//! way.

use super::model::{Proof, Step};
use super::step_id::StepId;
use tracing::debug;

/// Assign a fresh `number` to every entity of `proof`
pub fn number(proof: &mut Proof) {
    let mut counter: u32 = 1;

    for premise in &mut proof.premises {
        premise.number = Some(StepId::top(counter));
        counter += 1;
    }
    for step in &mut proof.steps {
        number_step(step, StepId::top(counter));
        counter += 1;
    }
    for goal in &mut proof.goals {
        goal.number = Some(StepId::top(counter));
        counter += 1;
    }

    debug!(lines = counter - 1, "numbered proof");
}

fn number_step(step: &mut Step, id: StepId) {
    match step {
        Step::Statement(statement) => statement.number = Some(id),
        Step::Subproof(subproof) => {
            subproof.premise.number = Some(id.child(1));
            for (i, inner) in subproof.steps.iter_mut().enumerate() {
                number_step(inner, id.child(i as u32 + 2));
            }
            subproof.number = Some(id);
        }
    }
}
