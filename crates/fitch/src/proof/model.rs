//! Proof tree data model
//!
//! Every entity carries a `NodeId` that is fixed at creation. Citations
//! (`Statement::parents`, `Goal::parent`) store node ids, so moving or
//! deleting other lines never re-targets them; the printed address of an
//! entity is its `number`, assigned by [`number`](super::number).

use super::step_id::StepId;
use crate::parser::ParsedFormula;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rule name carried by lines justified by scope entry rather than inference
pub const NO_RULE: &str = "none";

/// Stable identity of an entity within one proof
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An assumption of the whole proof
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Premise {
    pub id: NodeId,
    pub raw: String,
    pub result: ParsedFormula,
    pub number: Option<StepId>,
}

impl Premise {
    pub fn rule(&self) -> &'static str {
        NO_RULE
    }
}

/// One proof line: a formula, the rule that justifies it and the lines it cites
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub id: NodeId,
    pub raw: String,
    pub result: ParsedFormula,
    /// Short rule name such as `∧Elim`
    pub rule: String,
    pub parents: Vec<NodeId>,
    pub number: Option<StepId>,
}

/// A nested scope opened by a local assumption
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subproof {
    pub id: NodeId,
    pub premise: Statement,
    pub steps: Vec<Step>,
    pub number: Option<StepId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Step {
    #[serde(rename = "line")]
    Statement(Statement),
    Subproof(Subproof),
}

/// A formula the proof must reach, citing the line that establishes it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: NodeId,
    pub raw: String,
    pub result: ParsedFormula,
    pub parent: Option<NodeId>,
    pub number: Option<StepId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    pub premises: Vec<Premise>,
    pub steps: Vec<Step>,
    pub goals: Vec<Goal>,
    #[serde(default)]
    next_id: u32,
}

/// Shared view of any entity in the tree
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Premise(&'a Premise),
    Statement(&'a Statement),
    Subproof(&'a Subproof),
    Goal(&'a Goal),
}

impl<'a> EntityRef<'a> {
    pub fn id(&self) -> NodeId {
        match *self {
            EntityRef::Premise(p) => p.id,
            EntityRef::Statement(s) => s.id,
            EntityRef::Subproof(sp) => sp.id,
            EntityRef::Goal(g) => g.id,
        }
    }

    pub fn number(&self) -> Option<&'a StepId> {
        match *self {
            EntityRef::Premise(p) => p.number.as_ref(),
            EntityRef::Statement(s) => s.number.as_ref(),
            EntityRef::Subproof(sp) => sp.number.as_ref(),
            EntityRef::Goal(g) => g.number.as_ref(),
        }
    }
}

/// Mutable view of a formula-bearing line
#[derive(Debug)]
pub enum LineMut<'a> {
    Premise(&'a mut Premise),
    Statement(&'a mut Statement),
    /// The opening line of a subproof
    Assumption(&'a mut Statement),
    Goal(&'a mut Goal),
}

impl LineMut<'_> {
    pub fn set_text(&mut self, raw: String, result: ParsedFormula) {
        let (slot_raw, slot_result) = match self {
            LineMut::Premise(p) => (&mut p.raw, &mut p.result),
            LineMut::Statement(s) | LineMut::Assumption(s) => (&mut s.raw, &mut s.result),
            LineMut::Goal(g) => (&mut g.raw, &mut g.result),
        };
        *slot_raw = raw;
        *slot_result = result;
    }
}

impl Statement {
    pub(crate) fn empty(id: NodeId) -> Self {
        Statement {
            id,
            raw: String::new(),
            result: ParsedFormula::Empty,
            rule: NO_RULE.to_string(),
            parents: vec![],
            number: None,
        }
    }
}

impl Step {
    pub fn id(&self) -> NodeId {
        match self {
            Step::Statement(s) => s.id,
            Step::Subproof(sp) => sp.id,
        }
    }

    pub fn number(&self) -> Option<&StepId> {
        match self {
            Step::Statement(s) => s.number.as_ref(),
            Step::Subproof(sp) => sp.number.as_ref(),
        }
    }
}

impl Proof {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out a fresh node id, never reusing one present in the tree
    pub(crate) fn alloc_id(&mut self) -> NodeId {
        let floor = self
            .entities()
            .iter()
            .map(|e| e.id().0 + 1)
            .max()
            .unwrap_or(0);
        let id = self.next_id.max(floor);
        self.next_id = id + 1;
        NodeId(id)
    }

    /// All entities in document order: premises, steps (a subproof before
    /// its assumption and contents), goals.
    pub fn entities(&self) -> Vec<EntityRef<'_>> {
        let mut out: Vec<EntityRef<'_>> = self.premises.iter().map(EntityRef::Premise).collect();
        collect_steps(&self.steps, &mut out);
        out.extend(self.goals.iter().map(EntityRef::Goal));
        out
    }

    pub fn find(&self, id: NodeId) -> Option<EntityRef<'_>> {
        self.entities().into_iter().find(|e| e.id() == id)
    }

    /// The entity currently numbered `address`
    pub fn resolve(&self, address: &StepId) -> Option<NodeId> {
        self.entities()
            .into_iter()
            .find(|e| e.number() == Some(address))
            .map(|e| e.id())
    }

    pub fn number_of(&self, id: NodeId) -> Option<&StepId> {
        self.find(id).and_then(|e| e.number())
    }

    /// Id of the assumption line opening `subproof`
    pub fn assumption_of(&self, subproof: NodeId) -> Option<NodeId> {
        match self.find(subproof)? {
            EntityRef::Subproof(sp) => Some(sp.premise.id),
            _ => None,
        }
    }

    pub fn line_mut(&mut self, id: NodeId) -> Option<LineMut<'_>> {
        if let Some(p) = self.premises.iter_mut().find(|p| p.id == id) {
            return Some(LineMut::Premise(p));
        }
        if let Some(g) = self.goals.iter_mut().find(|g| g.id == id) {
            return Some(LineMut::Goal(g));
        }
        find_line_mut(&mut self.steps, id)
    }

    /// The step list a scope path designates. `[]` is the top level; `[2, 0]`
    /// is the body of subproof `steps[2].steps[0]`.
    pub(crate) fn step_list_mut(&mut self, scope: &[usize]) -> Option<&mut Vec<Step>> {
        let mut steps = &mut self.steps;
        for &index in scope {
            match steps.get_mut(index) {
                Some(Step::Subproof(sp)) => steps = &mut sp.steps,
                _ => return None,
            }
        }
        Some(steps)
    }
}

fn collect_steps<'a>(steps: &'a [Step], out: &mut Vec<EntityRef<'a>>) {
    for step in steps {
        match step {
            Step::Statement(s) => out.push(EntityRef::Statement(s)),
            Step::Subproof(sp) => {
                out.push(EntityRef::Subproof(sp));
                out.push(EntityRef::Statement(&sp.premise));
                collect_steps(&sp.steps, out);
            }
        }
    }
}

fn find_line_mut(steps: &mut [Step], id: NodeId) -> Option<LineMut<'_>> {
    for step in steps {
        match step {
            Step::Statement(s) => {
                if s.id == id {
                    return Some(LineMut::Statement(s));
                }
            }
            Step::Subproof(sp) => {
                if sp.premise.id == id {
                    return Some(LineMut::Assumption(&mut sp.premise));
                }
                if let Some(found) = find_line_mut(&mut sp.steps, id) {
                    return Some(found);
                }
            }
        }
    }
    None
}
