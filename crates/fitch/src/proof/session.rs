//! An editing session: one proof plus the settings it is edited with.

use super::model::{NodeId, Proof};
use crate::api::{
    submit, CustomRuleRequest, SuggestRequest, Suggestion, VerificationOutcome, Verifier,
};
use crate::config::FitchConfig;
use crate::convert::{convert_with, ConvertedProof};
use crate::error::{ApiError, ConvertError, EditError};
use crate::parser::{replace_substitutions, ParsedFormula};
use crate::rules::RuleBook;
use tracing::{debug, info, trace};

#[derive(Debug, Clone, Default)]
pub struct ProofSession {
    pub proof: Proof,
    pub config: FitchConfig,
    pub rules: RuleBook,
}

impl ProofSession {
    pub fn new(config: FitchConfig) -> Self {
        ProofSession {
            proof: Proof::new(),
            config,
            rules: RuleBook::default(),
        }
    }

    /// Apply shorthand substitution (if enabled), store the text and re-parse.
    /// Returns the stored text alongside the parse result so a UI can echo it.
    pub fn edit_text(&mut self, id: NodeId, raw: &str) -> Result<(String, ParsedFormula), EditError> {
        let text = if self.config.substitute_shorthand {
            replace_substitutions(raw)
        } else {
            raw.to_string()
        };
        let result = self.proof.set_raw(id, &text)?.clone();
        trace!(%id, status = result.status(), "edited line text");
        Ok((text, result))
    }

    /// Build the verifier payload, accepting custom rules known to this session
    pub fn convert(&self) -> Result<ConvertedProof, ConvertError> {
        convert_with(&self.proof, &self.rules)
    }

    /// Replace the known custom rules with the verifier's current list
    pub fn refresh_rules<V: Verifier>(&mut self, verifier: &mut V) -> Result<(), ApiError> {
        let listing = verifier.list_rules()?;
        self.rules = listing.rule_book();
        debug!(custom = listing.custom.len(), "refreshed rule list");
        Ok(())
    }

    pub fn verify<V: Verifier>(&self, verifier: &mut V) -> Result<VerificationOutcome, ApiError> {
        let converted = self.convert()?;
        submit(&converted, verifier)
    }

    /// Ask for candidate next lines, at most `verifier.max_suggestions` of them
    pub fn suggest<V: Verifier>(&self, verifier: &mut V) -> Result<Vec<Suggestion>, ApiError> {
        let request = SuggestRequest {
            proof: self.convert()?,
            max: self.config.verifier.max_suggestions,
        };
        let mut suggestions = verifier.suggest(&request)?;
        suggestions.truncate(request.max);
        Ok(suggestions)
    }

    /// Register this proof as a custom rule. On success the name becomes
    /// usable in this session straight away.
    pub fn register_as_rule<V: Verifier>(
        &mut self,
        name: &str,
        verifier: &mut V,
    ) -> Result<VerificationOutcome, ApiError> {
        let request = CustomRuleRequest {
            name: name.to_string(),
            proof: self.convert()?,
        };
        let outcome = verifier.register_rule(&request)?;
        if outcome.is_valid() {
            self.rules.add_custom(name);
            info!(name, "registered custom rule");
        }
        Ok(outcome)
    }
}
