//! Content classifier configuration
//!
//! Keyword lists and detector patterns are heuristics, not a compliance
//! guarantee. They are exposed here so operators can tune them without a
//! rebuild. Lists are comma-separated in the environment:
//!
//! `POWERDASH__SAFETY__AE_KEYWORDS="adverse event,fatal,anaphylaxis"`

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::safety::{
    ContentClassifier, DEFAULT_AE_KEYWORDS, DEFAULT_EMAIL_PATTERN, DEFAULT_NHS_NUMBER_PATTERN,
    DEFAULT_PHONE_PATTERN, DEFAULT_PII_KEYWORDS,
};

/// Keyword sets and detector patterns used by the content classifier.
#[derive(Debug, Clone, Deserialize)]
pub struct SafetyConfig {
    /// Adverse-event / pharmacovigilance terms (matched case-insensitively)
    #[serde(default = "default_ae_keywords")]
    pub ae_keywords: Vec<String>,

    /// Patient-identifiable terms (matched case-insensitively)
    #[serde(default = "default_pii_keywords")]
    pub pii_keywords: Vec<String>,

    #[serde(default = "default_email_pattern")]
    pub email_pattern: String,

    #[serde(default = "default_phone_pattern")]
    pub phone_pattern: String,

    #[serde(default = "default_nhs_number_pattern")]
    pub nhs_number_pattern: String,
}

impl SafetyConfig {
    /// Validate keyword lists and make sure every pattern compiles.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ae_keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(ValidationError::EmptyKeyword("SAFETY__AE_KEYWORDS"));
        }
        if self.pii_keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(ValidationError::EmptyKeyword("SAFETY__PII_KEYWORDS"));
        }

        for (name, pattern) in [
            ("email", &self.email_pattern),
            ("phone", &self.phone_pattern),
            ("NHS number", &self.nhs_number_pattern),
        ] {
            regex::Regex::new(pattern).map_err(|e| ValidationError::InvalidPattern {
                name,
                reason: e.to_string(),
            })?;
        }

        Ok(())
    }

    /// Builds the classifier described by this configuration.
    pub fn build_classifier(&self) -> Result<ContentClassifier, ValidationError> {
        self.validate()?;
        ContentClassifier::new(
            self.ae_keywords.as_slice(),
            self.pii_keywords.as_slice(),
            &self.email_pattern,
            &self.phone_pattern,
            &self.nhs_number_pattern,
        )
        .map_err(|e| ValidationError::InvalidPattern {
            name: "safety",
            reason: e.to_string(),
        })
    }
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            ae_keywords: default_ae_keywords(),
            pii_keywords: default_pii_keywords(),
            email_pattern: default_email_pattern(),
            phone_pattern: default_phone_pattern(),
            nhs_number_pattern: default_nhs_number_pattern(),
        }
    }
}

fn default_ae_keywords() -> Vec<String> {
    DEFAULT_AE_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

fn default_pii_keywords() -> Vec<String> {
    DEFAULT_PII_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

fn default_email_pattern() -> String {
    DEFAULT_EMAIL_PATTERN.to_string()
}

fn default_phone_pattern() -> String {
    DEFAULT_PHONE_PATTERN.to_string()
}

fn default_nhs_number_pattern() -> String {
    DEFAULT_NHS_NUMBER_PATTERN.to_string()
}
