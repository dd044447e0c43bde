use wasm_bindgen::prelude::*;
use serde::{Deserialize, Serialize};
use fitch::api::RuleListing;
use fitch::{
    locate_failure, number, parse_formula_input, replace_substitutions, Endpoint, FitchConfig,
    NodeId, ParsedFormula, Proof, ProofSession, VerificationOutcome,
};

/// Browser-side editor: one proof plus its settings
#[wasm_bindgen]
pub struct ProofEditor {
    session: ProofSession,
}

/// What the UI needs after a text edit
#[derive(Serialize, Deserialize)]
pub struct TextEdit {
    pub raw: String,
    pub result: ParsedFormula,
}

/// Verifier answer plus the line it points at, if that line still exists
#[derive(Serialize, Deserialize)]
pub struct VerificationReport {
    pub outcome: VerificationOutcome,
    pub node: Option<u32>,
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    // json_compatible so maps become plain objects
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value
        .serialize(&serializer)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

fn scope_path(scope: &[u32]) -> Vec<usize> {
    scope.iter().map(|&i| i as usize).collect()
}

fn endpoint(name: &str) -> Result<Endpoint, JsError> {
    match name {
        "verify_proof" => Ok(Endpoint::VerifyProof),
        "list_rules" => Ok(Endpoint::ListRules),
        "register_rule" => Ok(Endpoint::RegisterRule),
        "suggest_rules" => Ok(Endpoint::SuggestRules),
        other => Err(JsError::new(&format!("Unknown endpoint: {}", other))),
    }
}

/// Parse one line of input without touching any proof
#[wasm_bindgen(js_name = parseFormula)]
pub fn parse_formula(raw: &str) -> Result<JsValue, JsError> {
    to_js(&parse_formula_input(raw))
}

#[wasm_bindgen(js_name = replaceSubstitutions)]
pub fn substitute(raw: &str) -> String {
    replace_substitutions(raw)
}

#[wasm_bindgen]
impl ProofEditor {
    /// `config` may be `undefined` for the defaults
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ProofEditor, JsError> {
        let config: FitchConfig = if config.is_undefined() || config.is_null() {
            FitchConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))?
        };
        config.validate()?;
        web_sys::console::log_1(
            &format!("Proof editor using verifier at {}", config.verifier.base_url).into(),
        );
        Ok(ProofEditor {
            session: ProofSession::new(config),
        })
    }

    pub fn add_premise(&mut self) -> u32 {
        self.session.proof.add_premise().0
    }

    pub fn add_goal(&mut self) -> u32 {
        self.session.proof.add_goal().0
    }

    pub fn insert_statement(&mut self, scope: &[u32], index: usize) -> Result<u32, JsError> {
        Ok(self.session.proof.insert_statement(&scope_path(scope), index)?.0)
    }

    pub fn insert_subproof(&mut self, scope: &[u32], index: usize) -> Result<u32, JsError> {
        Ok(self.session.proof.insert_subproof(&scope_path(scope), index)?.0)
    }

    /// Id of the assumption line opening a subproof
    pub fn assumption_of(&self, subproof: u32) -> Option<u32> {
        self.session.proof.assumption_of(NodeId(subproof)).map(|id| id.0)
    }

    pub fn delete_premise(&mut self, index: usize) -> Result<(), JsError> {
        self.session.proof.delete_premise(index)?;
        Ok(())
    }

    pub fn delete_goal(&mut self, index: usize) -> Result<(), JsError> {
        self.session.proof.delete_goal(index)?;
        Ok(())
    }

    pub fn delete_step(&mut self, scope: &[u32], index: usize) -> Result<(), JsError> {
        self.session.proof.delete_step(&scope_path(scope), index)?;
        Ok(())
    }

    pub fn move_step(&mut self, scope: &[u32], from: usize, to: usize) -> Result<(), JsError> {
        self.session.proof.move_step(&scope_path(scope), from, to)?;
        Ok(())
    }

    /// Store new text for a line. Returns `{raw, result}` where `raw` is the
    /// text after shorthand substitution.
    pub fn set_text(&mut self, id: u32, raw: &str) -> Result<JsValue, JsError> {
        let (raw, result) = self.session.edit_text(NodeId(id), raw)?;
        to_js(&TextEdit { raw, result })
    }

    pub fn set_rule(&mut self, id: u32, rule: &str) -> Result<(), JsError> {
        self.session.proof.set_rule(NodeId(id), rule)?;
        Ok(())
    }

    /// `addresses` is a comma separated list such as `"1, 3.2"`
    pub fn set_parents(&mut self, id: u32, addresses: &str) -> Result<(), JsError> {
        self.session.proof.set_parents(NodeId(id), addresses)?;
        Ok(())
    }

    pub fn set_goal_parent(&mut self, id: u32, address: &str) -> Result<(), JsError> {
        self.session.proof.set_goal_parent(NodeId(id), address)?;
        Ok(())
    }

    /// The whole proof tree, numbers included
    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        to_js(&self.session.proof)
    }

    /// Replace the proof with a previously taken snapshot
    pub fn load(&mut self, snapshot: JsValue) -> Result<(), JsError> {
        let mut proof: Proof = serde_wasm_bindgen::from_value(snapshot)
            .map_err(|e| JsError::new(&format!("Invalid snapshot: {}", e)))?;
        number(&mut proof);
        self.session.proof = proof;
        Ok(())
    }

    /// Payload for the verify endpoint
    pub fn convert(&self) -> Result<JsValue, JsError> {
        let converted = self.session.convert()?;
        web_sys::console::log_1(
            &format!(
                "Converted proof: {} premises, {} steps, {} conclusions",
                converted.premises.len(),
                converted.steps.len(),
                converted.conclusions.len()
            )
            .into(),
        );
        to_js(&converted)
    }

    /// Payload for the verify endpoint as a JSON string, ready for `fetch`
    pub fn payload_json(&self) -> Result<String, JsError> {
        let converted = self.session.convert()?;
        converted
            .to_json()
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    /// Feed the body of `GET /rules` so custom rules convert verbatim
    pub fn set_rule_listing(&mut self, listing: JsValue) -> Result<(), JsError> {
        let listing: RuleListing = serde_wasm_bindgen::from_value(listing)
            .map_err(|e| JsError::new(&format!("Invalid rule listing: {}", e)))?;
        self.session.rules = listing.rule_book();
        Ok(())
    }

    /// Rule names to offer in the rule picker
    pub fn rule_choices(&self) -> Vec<String> {
        self.session
            .rules
            .choices()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn endpoint_url(&self, name: &str) -> Result<String, JsError> {
        Ok(self.session.config.verifier.url(endpoint(name)?))
    }

    pub fn max_suggestions(&self) -> usize {
        self.session.config.verifier.max_suggestions
    }

    /// Interpret the status and body of a verify response
    pub fn verification_result(&self, status: u16, body: &str) -> Result<JsValue, JsError> {
        let outcome = VerificationOutcome::from_response(status, body)?;
        if let VerificationOutcome::Invalid { message, .. } = &outcome {
            web_sys::console::warn_1(&format!("Proof rejected: {}", message).into());
        }
        let node = locate_failure(&self.session.proof, &outcome).map(|id| id.0);
        to_js(&VerificationReport { outcome, node })
    }
}

// Required for wasm-bindgen
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
}
