//! Editor configuration types.

use crate::api::Endpoint;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Configuration for an editing session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitchConfig {
    /// Rewrite ASCII shorthand (`&`, `$`, ...) into symbols on every text edit
    pub substitute_shorthand: bool,
    pub verifier: VerifierConfig,
}

/// Where the external verifier lives and how to query it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    pub base_url: String,
    /// Upper bound sent with rule-suggestion requests
    pub max_suggestions: usize,
}

impl Default for FitchConfig {
    fn default() -> Self {
        FitchConfig {
            substitute_shorthand: true,
            verifier: VerifierConfig::default(),
        }
    }
}

impl Default for VerifierConfig {
    fn default() -> Self {
        VerifierConfig {
            base_url: "http://localhost:5000".to_string(),
            max_suggestions: 5,
        }
    }
}

impl FitchConfig {
    /// Load from JSON; absent fields keep their defaults
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        let config: FitchConfig = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.verifier.max_suggestions == 0 {
            return Err(ConfigError::NoSuggestions);
        }
        Ok(())
    }
}

impl VerifierConfig {
    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), endpoint.path())
    }
}
