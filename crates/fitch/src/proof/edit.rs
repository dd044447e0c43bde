//! Editing operations on a proof
//!
//! Structural operations (add, insert, delete, move) renumber the proof
//! before returning. Text operations re-parse the edited line only.

use super::model::{Goal, LineMut, NodeId, Premise, Proof, Statement, Step, Subproof, NO_RULE};
use super::numbering::number;
use super::step_id::StepId;
use crate::error::EditError;
use crate::parser::{parse_formula_input, ParsedFormula};
use tracing::debug;

impl Proof {
    pub fn add_premise(&mut self) -> NodeId {
        let id = self.alloc_id();
        self.premises.push(Premise {
            id,
            raw: String::new(),
            result: ParsedFormula::Empty,
            number: None,
        });
        number(self);
        id
    }

    pub fn add_goal(&mut self) -> NodeId {
        let id = self.alloc_id();
        self.goals.push(Goal {
            id,
            raw: String::new(),
            result: ParsedFormula::Empty,
            parent: None,
            number: None,
        });
        number(self);
        id
    }

    /// Insert an empty line at `index` of the step list named by `scope`
    pub fn insert_statement(&mut self, scope: &[usize], index: usize) -> Result<NodeId, EditError> {
        let id = self.alloc_id();
        self.insert_step(scope, index, Step::Statement(Statement::empty(id)))?;
        Ok(id)
    }

    /// Open an empty subproof at `index` of the step list named by `scope`.
    /// Returns the id of the subproof itself; its assumption line gets the
    /// next id.
    pub fn insert_subproof(&mut self, scope: &[usize], index: usize) -> Result<NodeId, EditError> {
        let id = self.alloc_id();
        let premise_id = self.alloc_id();
        let subproof = Subproof {
            id,
            premise: Statement::empty(premise_id),
            steps: vec![],
            number: None,
        };
        self.insert_step(scope, index, Step::Subproof(subproof))?;
        Ok(id)
    }

    fn insert_step(&mut self, scope: &[usize], index: usize, step: Step) -> Result<(), EditError> {
        let steps = self
            .step_list_mut(scope)
            .ok_or_else(|| EditError::InvalidScope(scope.to_vec()))?;
        if index > steps.len() {
            return Err(EditError::IndexOutOfRange {
                index,
                len: steps.len(),
            });
        }
        steps.insert(index, step);
        number(self);
        Ok(())
    }

    pub fn delete_premise(&mut self, index: usize) -> Result<Premise, EditError> {
        check_index(index, self.premises.len())?;
        let removed = self.premises.remove(index);
        number(self);
        Ok(removed)
    }

    pub fn delete_goal(&mut self, index: usize) -> Result<Goal, EditError> {
        check_index(index, self.goals.len())?;
        let removed = self.goals.remove(index);
        number(self);
        Ok(removed)
    }

    /// Splice a step (and, for a subproof, everything inside it) out of its list
    pub fn delete_step(&mut self, scope: &[usize], index: usize) -> Result<Step, EditError> {
        let steps = self
            .step_list_mut(scope)
            .ok_or_else(|| EditError::InvalidScope(scope.to_vec()))?;
        check_index(index, steps.len())?;
        let removed = steps.remove(index);
        debug!(id = %removed.id(), "deleted step");
        number(self);
        Ok(removed)
    }

    /// Move a step to a new position within the same step list
    pub fn move_step(&mut self, scope: &[usize], from: usize, to: usize) -> Result<(), EditError> {
        let steps = self
            .step_list_mut(scope)
            .ok_or_else(|| EditError::InvalidScope(scope.to_vec()))?;
        check_index(from, steps.len())?;
        check_index(to, steps.len())?;
        let step = steps.remove(from);
        steps.insert(to, step);
        number(self);
        Ok(())
    }

    /// Replace the text of a line and re-parse it. Numbering is untouched.
    pub fn set_raw(&mut self, id: NodeId, raw: &str) -> Result<&ParsedFormula, EditError> {
        let result = parse_formula_input(raw);
        let mut line = self.line_mut(id).ok_or(EditError::UnknownNode(id))?;
        line.set_text(raw.to_string(), result);
        Ok(match line {
            LineMut::Premise(p) => &p.result,
            LineMut::Statement(s) | LineMut::Assumption(s) => &s.result,
            LineMut::Goal(g) => &g.result,
        })
    }

    /// Set the short rule name justifying an inference line
    pub fn set_rule(&mut self, id: NodeId, rule: &str) -> Result<(), EditError> {
        match self.line_mut(id) {
            Some(LineMut::Statement(s)) => {
                s.rule = rule.to_string();
                Ok(())
            }
            Some(LineMut::Assumption(_)) => {
                if rule == NO_RULE {
                    Ok(())
                } else {
                    Err(EditError::AssumptionRule)
                }
            }
            Some(_) => Err(EditError::NotAStatement(id)),
            None => Err(EditError::UnknownNode(id)),
        }
    }

    /// Set the cited lines of an inference line from a comma separated list
    /// of addresses such as `"1, 3.2"`. Each address must name a line that
    /// exists now.
    pub fn set_parents(&mut self, id: NodeId, addresses: &str) -> Result<(), EditError> {
        let parents = self.resolve_addresses(addresses)?;
        match self.line_mut(id) {
            Some(LineMut::Statement(s)) => {
                s.parents = parents;
                Ok(())
            }
            Some(LineMut::Assumption(_)) => {
                if parents.is_empty() {
                    Ok(())
                } else {
                    Err(EditError::AssumptionRule)
                }
            }
            Some(_) => Err(EditError::NotAStatement(id)),
            None => Err(EditError::UnknownNode(id)),
        }
    }

    /// Point a goal at the line that establishes it
    pub fn set_goal_parent(&mut self, id: NodeId, address: &str) -> Result<(), EditError> {
        let parent = self.resolve_address(address)?;
        match self.line_mut(id) {
            Some(LineMut::Goal(g)) => {
                g.parent = Some(parent);
                Ok(())
            }
            Some(_) => Err(EditError::NotAGoal(id)),
            None => Err(EditError::UnknownNode(id)),
        }
    }

    pub fn resolve_address(&self, address: &str) -> Result<NodeId, EditError> {
        let step_id: StepId = address
            .parse()
            .map_err(|_| EditError::InvalidAddress(address.to_string()))?;
        self.resolve(&step_id)
            .ok_or_else(|| EditError::UnknownAddress(step_id.to_string()))
    }

    fn resolve_addresses(&self, addresses: &str) -> Result<Vec<NodeId>, EditError> {
        addresses
            .split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(|a| self.resolve_address(a))
            .collect()
    }
}

fn check_index(index: usize, len: usize) -> Result<(), EditError> {
    if index < len {
        Ok(())
    } else {
        Err(EditError::IndexOutOfRange { index, len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number_str(proof: &Proof, id: NodeId) -> String {
        proof.number_of(id).map(|n| n.to_string()).unwrap_or_default()
    }

    #[test]
    fn test_add_creates_empty_numbered_entities() {
        let mut proof = Proof::new();
        let p = proof.add_premise();
        let g = proof.add_goal();
        let s = proof.insert_statement(&[], 0).unwrap();

        assert_eq!(number_str(&proof, p), "1");
        assert_eq!(number_str(&proof, s), "2");
        assert_eq!(number_str(&proof, g), "3");
        assert_eq!(proof.premises[0].raw, "");
        assert_eq!(proof.premises[0].result, ParsedFormula::Empty);
    }

    #[test]
    fn test_insert_rejects_bad_scope_and_index() {
        let mut proof = Proof::new();
        proof.insert_statement(&[], 0).unwrap();
        assert_eq!(
            proof.insert_statement(&[0], 0),
            Err(EditError::InvalidScope(vec![0]))
        );
        assert_eq!(
            proof.insert_statement(&[], 5),
            Err(EditError::IndexOutOfRange { index: 5, len: 1 })
        );
    }

    #[test]
    fn test_citations_follow_their_target_when_lines_move() {
        let mut proof = Proof::new();
        let p = proof.add_premise();
        proof.set_raw(p, "P∧Q").unwrap();
        let a = proof.insert_statement(&[], 0).unwrap();
        let b = proof.insert_statement(&[], 1).unwrap();
        proof.set_parents(b, "2").unwrap();
        assert!(proof.find(b).is_some());

        proof.move_step(&[], 1, 0).unwrap();
        assert_eq!(number_str(&proof, b), "2");
        assert_eq!(number_str(&proof, a), "3");
        match &proof.steps[0] {
            Step::Statement(s) => assert_eq!(s.parents, vec![a]),
            other => panic!("expected statement, got {:?}", other),
        }
    }

    #[test]
    fn test_set_parents_resolves_addresses() {
        let mut proof = Proof::new();
        let p = proof.add_premise();
        let sp = proof.insert_subproof(&[], 0).unwrap();
        let inner = proof.insert_statement(&[0], 0).unwrap();
        let after = proof.insert_statement(&[], 1).unwrap();

        proof.set_parents(after, "1, 2.1,2.2 ,2").unwrap();
        let assumption = NodeId(sp.0 + 1);
        match &proof.steps[1] {
            Step::Statement(s) => assert_eq!(s.parents, vec![p, assumption, inner, sp]),
            other => panic!("expected statement, got {:?}", other),
        }

        assert_eq!(
            proof.set_parents(after, "9"),
            Err(EditError::UnknownAddress("9".to_string()))
        );
        assert_eq!(
            proof.set_parents(after, "x.1"),
            Err(EditError::InvalidAddress("x.1".to_string()))
        );
        assert_eq!(proof.set_parents(p, "1"), Err(EditError::NotAStatement(p)));
        assert_eq!(proof.set_parents(assumption, "1"), Err(EditError::AssumptionRule));
        assert_eq!(proof.set_parents(assumption, ""), Ok(()));
    }

    #[test]
    fn test_set_rule_restrictions() {
        let mut proof = Proof::new();
        let p = proof.add_premise();
        let sp = proof.insert_subproof(&[], 0).unwrap();
        let s = proof.insert_statement(&[], 1).unwrap();
        let assumption = NodeId(sp.0 + 1);

        proof.set_rule(s, "∧Elim").unwrap();
        assert_eq!(proof.set_rule(p, "∧Elim"), Err(EditError::NotAStatement(p)));
        assert_eq!(proof.set_rule(assumption, "∧Elim"), Err(EditError::AssumptionRule));
        assert_eq!(proof.set_rule(assumption, NO_RULE), Ok(()));
        assert_eq!(proof.set_rule(NodeId(99), "∧Elim"), Err(EditError::UnknownNode(NodeId(99))));
    }

    #[test]
    fn test_set_raw_reparses_without_renumbering() {
        let mut proof = Proof::new();
        let p = proof.add_premise();
        proof.premises[0].number = None;

        let result = proof.set_raw(p, "P ∧").unwrap();
        assert_eq!(result.status(), "incomplete");
        assert!(proof.set_raw(p, "P ∧ Q").unwrap().is_ok());
        assert_eq!(proof.premises[0].raw, "P ∧ Q");
        assert_eq!(proof.premises[0].number, None);
    }

    #[test]
    fn test_delete_subproof_removes_contents() {
        let mut proof = Proof::new();
        let sp = proof.insert_subproof(&[], 0).unwrap();
        let inner = proof.insert_statement(&[0], 0).unwrap();
        let last = proof.insert_statement(&[], 1).unwrap();

        let removed = proof.delete_step(&[], 0).unwrap();
        assert_eq!(removed.id(), sp);
        assert!(proof.find(inner).is_none());
        assert_eq!(number_str(&proof, last), "1");
        assert_eq!(
            proof.delete_step(&[], 3).map(|s| s.id()),
            Err(EditError::IndexOutOfRange { index: 3, len: 1 })
        );
    }

    #[test]
    fn test_goal_parent() {
        let mut proof = Proof::new();
        proof.add_premise();
        let g = proof.add_goal();
        proof.set_goal_parent(g, "1").unwrap();
        assert_eq!(proof.goals[0].parent, Some(proof.premises[0].id));
        assert_eq!(
            proof.set_goal_parent(proof.premises[0].id, "1"),
            Err(EditError::NotAGoal(proof.premises[0].id))
        );
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut proof = Proof::new();
        let a = proof.insert_statement(&[], 0).unwrap();
        proof.delete_step(&[], 0).unwrap();
        let b = proof.insert_statement(&[], 0).unwrap();
        assert_ne!(a, b);
    }
}
