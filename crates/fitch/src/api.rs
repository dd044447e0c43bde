//! Verifier protocol types
//!
//! Request and response shapes for the external proof-checking service,
//! plus the `Verifier` trait that transports implement. No HTTP client lives
//! here; a transport hands back the status code and body it received and
//! the helpers below interpret them.

use crate::convert::{convert, ConvertedProof, FormulaJson};
use crate::error::ApiError;
use crate::proof::{NodeId, Proof, StepId};
use crate::rules::RuleBook;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    VerifyProof,
    ListRules,
    RegisterRule,
    SuggestRules,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::VerifyProof => "/verify_proof",
            Endpoint::ListRules | Endpoint::RegisterRule => "/rules",
            Endpoint::SuggestRules => "/suggest_rules",
        }
    }

    pub fn method(self) -> Method {
        match self {
            Endpoint::ListRules => Method::Get,
            Endpoint::VerifyProof | Endpoint::RegisterRule | Endpoint::SuggestRules => Method::Post,
        }
    }
}

/// Error body returned with status 400
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationError {
    #[serde(default)]
    pub step_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum VerificationOutcome {
    Valid,
    Invalid {
        /// Address of the offending line, if the verifier could name one
        step_id: Option<String>,
        message: String,
    },
}

impl VerificationOutcome {
    /// Interpret a verify (or register) response: any 2xx is valid, 400
    /// carries `{step_id, message}`.
    pub fn from_response(status: u16, body: &str) -> Result<Self, ApiError> {
        match status {
            200..=299 => Ok(VerificationOutcome::Valid),
            400 => {
                let error: VerificationError = serde_json::from_str(body)?;
                Ok(VerificationOutcome::Invalid {
                    step_id: error.step_id,
                    message: error.message,
                })
            }
            other => Err(ApiError::UnexpectedStatus(other)),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, VerificationOutcome::Valid)
    }
}

/// Decode the JSON body of a successful response
pub fn decode_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::UnexpectedStatus(status));
    }
    Ok(serde_json::from_str(body)?)
}

/// Answer of the rules-listing endpoint (long names)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleListing {
    pub builtin: Vec<String>,
    pub custom: Vec<String>,
}

impl RuleListing {
    pub fn rule_book(&self) -> RuleBook {
        RuleBook::with_custom(self.custom.iter().cloned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestRequest {
    pub proof: ConvertedProof,
    pub max: usize,
}

/// A candidate next line proposed by the verifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub formula: FormulaJson,
    /// The formula as the verifier prints it
    pub str_formula: String,
    pub rule: String,
    pub premises: Vec<String>,
    pub score: f64,
}

/// Registers a proven derivation as a reusable rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomRuleRequest {
    pub name: String,
    pub proof: ConvertedProof,
}

/// A transport to the verification service
pub trait Verifier {
    fn verify(&mut self, proof: &ConvertedProof) -> Result<VerificationOutcome, ApiError>;

    fn list_rules(&mut self) -> Result<RuleListing, ApiError>;

    fn suggest(&mut self, request: &SuggestRequest) -> Result<Vec<Suggestion>, ApiError>;

    /// The service checks the proof before storing it, so an invalid proof
    /// comes back as `Invalid` rather than an error.
    fn register_rule(&mut self, request: &CustomRuleRequest) -> Result<VerificationOutcome, ApiError>;
}

/// Convert `proof` with the built-in rules and submit it
pub fn check_proof<V: Verifier>(proof: &Proof, verifier: &mut V) -> Result<VerificationOutcome, ApiError> {
    let converted = convert(proof)?;
    submit(&converted, verifier)
}

pub(crate) fn submit<V: Verifier>(
    converted: &ConvertedProof,
    verifier: &mut V,
) -> Result<VerificationOutcome, ApiError> {
    info!(
        premises = converted.premises.len(),
        steps = converted.steps.len(),
        "submitting proof for verification"
    );
    let outcome = verifier.verify(converted)?;
    match &outcome {
        VerificationOutcome::Valid => info!("proof verified"),
        VerificationOutcome::Invalid { step_id, message } => {
            warn!(step_id = step_id.as_deref().unwrap_or("-"), %message, "proof rejected")
        }
    }
    Ok(outcome)
}

/// The line a rejection points at, if it still exists
pub fn locate_failure(proof: &Proof, outcome: &VerificationOutcome) -> Option<NodeId> {
    match outcome {
        VerificationOutcome::Invalid {
            step_id: Some(step_id),
            ..
        } => {
            let address: StepId = step_id.parse().ok()?;
            proof.resolve(&address)
        }
        _ => None,
    }
}
