//! Verifier payload
//!
//! Converts an edited, numbered `Proof` into the JSON document the external
//! verifier consumes. Addresses are printed as dotted strings and rule names
//! are translated to their long form. Conversion is all or nothing.

use crate::error::ConvertError;
use crate::logic::{Formula, Term};
use crate::parser::ParsedFormula;
use crate::proof::{NodeId, Proof, Statement, Step, StepId, Subproof};
use crate::rules::{RuleBook, ASSUMPTION, REITERATION};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Wire representation of a term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TermJson {
    Variable { name: String },
    Constant { name: String },
}

impl From<&Term> for TermJson {
    fn from(term: &Term) -> Self {
        match term {
            Term::Variable(v) => TermJson::Variable {
                name: v.name.clone(),
            },
            Term::Constant(c) => TermJson::Constant {
                name: c.name.clone(),
            },
        }
    }
}

/// Wire representation of a formula
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FormulaJson {
    Var {
        name: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<TermJson>,
    },
    Not {
        value: Box<FormulaJson>,
    },
    And {
        left: Box<FormulaJson>,
        right: Box<FormulaJson>,
    },
    Or {
        left: Box<FormulaJson>,
        right: Box<FormulaJson>,
    },
    Implies {
        left: Box<FormulaJson>,
        right: Box<FormulaJson>,
    },
    Iff {
        left: Box<FormulaJson>,
        right: Box<FormulaJson>,
    },
    Bottom,
    Forall {
        variable: String,
        body: Box<FormulaJson>,
    },
    Exists {
        variable: String,
        body: Box<FormulaJson>,
    },
}

impl From<&Formula> for FormulaJson {
    fn from(formula: &Formula) -> Self {
        let boxed = |f: &Formula| Box::new(FormulaJson::from(f));
        match formula {
            Formula::Predicate(p) => FormulaJson::Var {
                name: p.name.clone(),
                args: p.args.iter().map(TermJson::from).collect(),
            },
            Formula::Not { operand } => FormulaJson::Not {
                value: boxed(operand),
            },
            Formula::And { left, right } => FormulaJson::And {
                left: boxed(left),
                right: boxed(right),
            },
            Formula::Or { left, right } => FormulaJson::Or {
                left: boxed(left),
                right: boxed(right),
            },
            Formula::Implies { left, right } => FormulaJson::Implies {
                left: boxed(left),
                right: boxed(right),
            },
            Formula::Iff { left, right } => FormulaJson::Iff {
                left: boxed(left),
                right: boxed(right),
            },
            Formula::Bottom => FormulaJson::Bottom,
            Formula::Forall { variable, body } => FormulaJson::Forall {
                variable: variable.name.clone(),
                body: boxed(body),
            },
            Formula::Exists { variable, body } => FormulaJson::Exists {
                variable: variable.name.clone(),
                body: boxed(body),
            },
        }
    }
}

/// A premise or subproof assumption. These never cite anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssumptionJson {
    pub id: String,
    pub formula: FormulaJson,
    pub rule: String,
}

/// An inference step or conclusion. `premises` is always sent, even empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementJson {
    pub id: String,
    pub formula: FormulaJson,
    pub rule: String,
    #[serde(default)]
    pub premises: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubproofTag {
    Subproof,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubproofJson {
    pub id: String,
    #[serde(rename = "type")]
    pub tag: SubproofTag,
    pub assumption: AssumptionJson,
    pub steps: Vec<StepJson>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepJson {
    Subproof(SubproofJson),
    Statement(StatementJson),
}

/// The document sent to the verifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertedProof {
    pub premises: Vec<AssumptionJson>,
    pub steps: Vec<StepJson>,
    pub conclusions: Vec<StatementJson>,
}

impl ConvertedProof {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Convert using the built-in rule table only
pub fn convert(proof: &Proof) -> Result<ConvertedProof, ConvertError> {
    convert_with(proof, &RuleBook::default())
}

/// Convert, also accepting the custom rules registered in `rules`
pub fn convert_with(proof: &Proof, rules: &RuleBook) -> Result<ConvertedProof, ConvertError> {
    let converter = Converter::new(proof, rules)?;

    let premises = proof
        .premises
        .iter()
        .map(|p| -> Result<AssumptionJson, ConvertError> {
            let id = converter.number(p.id)?;
            Ok(AssumptionJson {
                id: id.to_string(),
                formula: formula_json(id, &p.result)?,
                rule: ASSUMPTION.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let steps = converter.steps(&proof.steps)?;

    let conclusions = proof
        .goals
        .iter()
        .map(|g| -> Result<StatementJson, ConvertError> {
            let id = converter.number(g.id)?;
            let parent = g.parent.ok_or_else(|| ConvertError::MissingGoalParent {
                id: id.to_string(),
            })?;
            Ok(StatementJson {
                id: id.to_string(),
                formula: formula_json(id, &g.result)?,
                rule: REITERATION.to_string(),
                premises: converter.citations(id, &[parent])?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        premises = premises.len(),
        steps = steps.len(),
        conclusions = conclusions.len(),
        "converted proof"
    );

    Ok(ConvertedProof {
        premises,
        steps,
        conclusions,
    })
}

struct Converter<'a> {
    rules: &'a RuleBook,
    numbers: HashMap<NodeId, &'a StepId>,
}

impl<'a> Converter<'a> {
    fn new(proof: &'a Proof, rules: &'a RuleBook) -> Result<Self, ConvertError> {
        let numbers = proof
            .entities()
            .into_iter()
            .map(|e| e.number().map(|n| (e.id(), n)).ok_or(ConvertError::Unnumbered))
            .collect::<Result<HashMap<_, _>, _>>()?;
        Ok(Converter { rules, numbers })
    }

    fn number(&self, id: NodeId) -> Result<&'a StepId, ConvertError> {
        self.numbers.get(&id).copied().ok_or(ConvertError::Unnumbered)
    }

    fn steps(&self, steps: &[Step]) -> Result<Vec<StepJson>, ConvertError> {
        steps
            .iter()
            .map(|step| match step {
                Step::Statement(s) => self.statement(s).map(StepJson::Statement),
                Step::Subproof(sp) => self.subproof(sp).map(StepJson::Subproof),
            })
            .collect()
    }

    fn statement(&self, statement: &Statement) -> Result<StatementJson, ConvertError> {
        let id = self.number(statement.id)?;
        let rule = self
            .rules
            .resolve(&statement.rule)
            .ok_or_else(|| ConvertError::UnmappedRule {
                id: id.to_string(),
                rule: statement.rule.clone(),
            })?;
        Ok(StatementJson {
            id: id.to_string(),
            formula: formula_json(id, &statement.result)?,
            rule: rule.to_string(),
            premises: self.citations(id, &statement.parents)?,
        })
    }

    fn subproof(&self, subproof: &Subproof) -> Result<SubproofJson, ConvertError> {
        let id = self.number(subproof.id)?;
        let assumption_id = self.number(subproof.premise.id)?;
        let assumption = AssumptionJson {
            id: assumption_id.to_string(),
            formula: formula_json(assumption_id, &subproof.premise.result)?,
            rule: ASSUMPTION.to_string(),
        };
        Ok(SubproofJson {
            id: id.to_string(),
            tag: SubproofTag::Subproof,
            assumption,
            steps: self.steps(&subproof.steps)?,
        })
    }

    /// Addresses of the cited lines, each of which must precede `id`
    fn citations(&self, id: &StepId, parents: &[NodeId]) -> Result<Vec<String>, ConvertError> {
        parents
            .iter()
            .map(|&target| -> Result<String, ConvertError> {
                let cited = self
                    .numbers
                    .get(&target)
                    .ok_or_else(|| ConvertError::DanglingReference {
                        id: id.to_string(),
                        target,
                    })?;
                if !cited.is_before(id) {
                    return Err(ConvertError::ForwardReference {
                        id: id.to_string(),
                        cited: cited.to_string(),
                    });
                }
                Ok(cited.to_string())
            })
            .collect()
    }
}

fn formula_json(id: &StepId, result: &ParsedFormula) -> Result<FormulaJson, ConvertError> {
    result
        .formula()
        .map(FormulaJson::from)
        .ok_or_else(|| ConvertError::InvalidFormula {
            id: id.to_string(),
            status: result.status(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Premise `P ∧ Q`, step `P` by ∧Elim from 1, goal `P` citing the step
    fn simple() -> (Proof, NodeId, NodeId) {
        let mut proof = Proof::new();
        let premise = proof.add_premise();
        proof.set_raw(premise, "P ∧ Q").unwrap();
        let step = proof.insert_statement(&[], 0).unwrap();
        proof.set_raw(step, "P").unwrap();
        proof.set_rule(step, "∧Elim").unwrap();
        proof.set_parents(step, "1").unwrap();
        let goal = proof.add_goal();
        proof.set_raw(goal, "P").unwrap();
        proof.set_goal_parent(goal, "2").unwrap();
        (proof, step, goal)
    }

    #[test]
    fn test_simple_proof() {
        let (proof, _, _) = simple();
        let converted = convert(&proof).unwrap();

        assert_eq!(converted.premises[0].id, "1");
        assert_eq!(converted.premises[0].rule, "Assumption");
        match &converted.steps[0] {
            StepJson::Statement(s) => {
                assert_eq!(s.id, "2");
                assert_eq!(s.rule, "And Elimination");
                assert_eq!(s.premises, vec!["1"]);
            }
            other => panic!("expected statement, got {:?}", other),
        }
        assert_eq!(converted.conclusions[0].rule, "Reiteration");
        assert_eq!(converted.conclusions[0].premises, vec!["2"]);
    }

    #[test]
    fn test_wire_shape() {
        let (proof, _, _) = simple();
        let json = serde_json::to_value(convert(&proof).unwrap()).unwrap();
        assert_eq!(
            json,
            json!({
                "premises": [{
                    "id": "1",
                    "formula": {
                        "type": "and",
                        "left": {"type": "var", "name": "P"},
                        "right": {"type": "var", "name": "Q"}
                    },
                    "rule": "Assumption"
                }],
                "steps": [{
                    "id": "2",
                    "formula": {"type": "var", "name": "P"},
                    "rule": "And Elimination",
                    "premises": ["1"]
                }],
                "conclusions": [{
                    "id": "3",
                    "formula": {"type": "var", "name": "P"},
                    "rule": "Reiteration",
                    "premises": ["2"]
                }]
            })
        );
    }

    #[test]
    fn test_subproof_shape() {
        // 1 P → Q; 2 [2.1 ¬Q; 2.2 ¬P]; 3 ¬Q → ¬P
        let mut proof = Proof::new();
        let premise = proof.add_premise();
        proof.set_raw(premise, "P → Q").unwrap();
        let sp = proof.insert_subproof(&[], 0).unwrap();
        let assumption = proof.assumption_of(sp).unwrap();
        proof.set_raw(assumption, "¬Q").unwrap();
        let inner = proof.insert_statement(&[0], 0).unwrap();
        proof.set_raw(inner, "¬P").unwrap();
        proof.set_rule(inner, "S-Ind").unwrap();
        proof.set_parents(inner, "1, 2.1").unwrap();
        let closing = proof.insert_statement(&[], 1).unwrap();
        proof.set_raw(closing, "¬Q → ¬P").unwrap();
        proof.set_rule(closing, "→Intro").unwrap();
        proof.set_parents(closing, "2").unwrap();

        let json = serde_json::to_value(convert(&proof).unwrap()).unwrap();
        assert_eq!(
            json["steps"][0],
            json!({
                "id": "2",
                "type": "subproof",
                "assumption": {
                    "id": "2.1",
                    "formula": {"type": "not", "value": {"type": "var", "name": "Q"}},
                    "rule": "Assumption"
                },
                "steps": [{
                    "id": "2.2",
                    "formula": {"type": "not", "value": {"type": "var", "name": "P"}},
                    "rule": "Strong Induction",
                    "premises": ["1", "2.1"]
                }]
            })
        );
        assert_eq!(json["steps"][1]["rule"], "Implies Introduction");
        assert_eq!(json["steps"][1]["premises"], json!(["2"]));
    }

    #[test]
    fn test_quantifier_and_bottom_shape() {
        let parsed = crate::parser::parse_formula("∀x (P(x, alice) → ⊥)").unwrap();
        let json = serde_json::to_value(FormulaJson::from(&parsed)).unwrap();
        assert_eq!(
            json,
            json!({
                "type": "forall",
                "variable": "x",
                "body": {
                    "type": "implies",
                    "left": {
                        "type": "var",
                        "name": "P",
                        "args": [
                            {"type": "variable", "name": "x"},
                            {"type": "constant", "name": "alice"}
                        ]
                    },
                    "right": {"type": "bottom"}
                }
            })
        );
    }

    #[test]
    fn test_single_letter_arguments_are_variables() {
        let parsed = crate::parser::parse_formula("P(a)").unwrap();
        let json = serde_json::to_value(FormulaJson::from(&parsed)).unwrap();
        assert_eq!(json["args"][0], json!({"type": "variable", "name": "a"}));
    }

    #[test]
    fn test_uncited_step_sends_empty_premises() {
        let (mut proof, step, _) = simple();
        proof.set_rule(step, "Reit").unwrap();
        proof.set_parents(step, "").unwrap();
        let json = serde_json::to_value(convert(&proof).unwrap()).unwrap();
        assert_eq!(json["steps"][0]["premises"], json!([]));
        assert_eq!(json["steps"][0]["rule"], "Reiteration");
        assert!(json["premises"][0].get("premises").is_none());
    }

    #[test]
    fn test_invalid_formula_fails() {
        let (mut proof, step, _) = simple();
        proof.set_raw(step, "P ∧").unwrap();
        assert_eq!(
            convert(&proof),
            Err(ConvertError::InvalidFormula {
                id: "2".to_string(),
                status: "incomplete"
            })
        );
        proof.set_raw(step, "").unwrap();
        assert!(matches!(
            convert(&proof),
            Err(ConvertError::InvalidFormula { status: "empty", .. })
        ));
    }

    #[test]
    fn test_unmapped_rule_fails() {
        let (mut proof, step, _) = simple();
        proof.set_rule(step, "none").unwrap();
        assert_eq!(
            convert(&proof),
            Err(ConvertError::UnmappedRule {
                id: "2".to_string(),
                rule: "none".to_string()
            })
        );
        proof.set_rule(step, "Modus Tollens").unwrap();
        assert!(convert(&proof).is_err());

        let book = RuleBook::with_custom(["Modus Tollens"]);
        let converted = convert_with(&proof, &book).unwrap();
        assert_eq!(converted.conclusions.len(), 1);

        // reserved names never become custom rules
        proof.set_rule(step, "none").unwrap();
        let book = RuleBook::with_custom(["none", "Assumption"]);
        assert!(matches!(
            convert_with(&proof, &book),
            Err(ConvertError::UnmappedRule { .. })
        ));
        proof.set_rule(step, "Modus Tollens").unwrap();
        let book = RuleBook::with_custom(["Modus Tollens"]);
        let converted = convert_with(&proof, &book).unwrap();
        match &converted.steps[0] {
            StepJson::Statement(s) => assert_eq!(s.rule, "Modus Tollens"),
            other => panic!("expected statement, got {:?}", other),
        }
    }

    #[test]
    fn test_reference_failures() {
        let (mut proof, step, goal) = simple();

        // the cited premise disappears
        proof.delete_premise(0).unwrap();
        proof.add_premise();
        let premise = proof.premises[0].id;
        proof.set_raw(premise, "P ∧ Q").unwrap();
        assert!(matches!(
            convert(&proof),
            Err(ConvertError::DanglingReference { .. })
        ));

        // a step citing a later line
        proof.set_parents(step, "3").unwrap();
        assert_eq!(
            convert(&proof),
            Err(ConvertError::ForwardReference {
                id: "2".to_string(),
                cited: "3".to_string()
            })
        );

        proof.set_parents(step, "1").unwrap();
        proof.goals[0].parent = None;
        assert_eq!(
            convert(&proof),
            Err(ConvertError::MissingGoalParent { id: "3".to_string() })
        );
        proof.set_goal_parent(goal, "2").unwrap();
        assert!(convert(&proof).is_ok());
    }

    #[test]
    fn test_unnumbered_fails() {
        let json = json!({
            "premises": [{"id": 0, "raw": "P", "result": {"status": "ok", "formula": {"type": "predicate", "name": "P", "args": []}}, "number": null}],
            "steps": [],
            "goals": []
        });
        let proof: Proof = serde_json::from_value(json).unwrap();
        assert_eq!(convert(&proof), Err(ConvertError::Unnumbered));
    }

    #[test]
    fn test_wire_round_trip_through_json() {
        let (proof, _, _) = simple();
        let converted = convert(&proof).unwrap();
        let back: ConvertedProof = serde_json::from_str(&converted.to_json().unwrap()).unwrap();
        assert_eq!(back, converted);
    }
}
