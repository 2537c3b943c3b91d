//! Rule-based adverse-event / patient-identifiable data classifier.
//!
//! Two keyword sets are matched as case-insensitive substrings, recording at
//! most one reason per set (first configured keyword found wins). Three pattern
//! detectors (email, phone, NHS-number shape) then run unconditionally, each
//! adding its own reason. Reason order is fixed:
//!
//! 1. adverse-event keyword
//! 2. patient-identifiable keyword
//! 3. email pattern
//! 4. phone pattern
//! 5. NHS-number pattern
//!
//! Classification is a pure, total function: it never fails and never performs I/O.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ClassificationVerdict;

/// Built-in adverse-event / pharmacovigilance terms.
pub const DEFAULT_AE_KEYWORDS: &[&str] = &[
    "adverse event",
    "side effect",
    "reaction",
    "toxicity",
    "hospitalised",
    "hospitalized",
    "death",
    "fatal",
    "life-threatening",
    "anaphylaxis",
    "pharmacovigilance",
];

/// Built-in patient-identifiable terms.
pub const DEFAULT_PII_KEYWORDS: &[&str] = &[
    "nhs number",
    "date of birth",
    "address",
    "postcode",
    "patient name",
    "medical record",
    "email",
    "phone",
];

pub const DEFAULT_EMAIL_PATTERN: &str = r"(?i)\b[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}\b";

/// Broad on purpose: any digit run of 9+ characters with common separators.
pub const DEFAULT_PHONE_PATTERN: &str = r"\b\+?\d[\d\s().-]{7,}\d\b";

/// 3-3-4 digit grouping with optional single spaces. Matches any 10-digit run.
pub const DEFAULT_NHS_NUMBER_PATTERN: &str = r"\b\d{3}\s?\d{3}\s?\d{4}\b";

pub const EMAIL_REASON: &str = "Possible email address detected.";
pub const PHONE_REASON: &str = "Possible phone number detected.";
pub const NHS_NUMBER_REASON: &str = "Possible NHS number detected.";

static BUILTIN: Lazy<ContentClassifier> = Lazy::new(|| {
    ContentClassifier::new(
        DEFAULT_AE_KEYWORDS,
        DEFAULT_PII_KEYWORDS,
        DEFAULT_EMAIL_PATTERN,
        DEFAULT_PHONE_PATTERN,
        DEFAULT_NHS_NUMBER_PATTERN,
    )
    .expect("built-in safety patterns must compile")
});

/// Content classifier with a fixed rule set.
///
/// Construct once (from defaults or configuration) and share freely; it holds
/// no mutable state.
#[derive(Debug, Clone)]
pub struct ContentClassifier {
    ae_keywords: Vec<String>,
    pii_keywords: Vec<String>,
    email: Regex,
    phone: Regex,
    nhs_number: Regex,
}

impl ContentClassifier {
    /// Creates a classifier from keyword sets and detector patterns.
    ///
    /// Keywords are lowercased here so matching only lowercases the input.
    ///
    /// # Errors
    ///
    /// Returns the regex error of the first pattern that fails to compile.
    pub fn new<K: AsRef<str>>(
        ae_keywords: &[K],
        pii_keywords: &[K],
        email_pattern: &str,
        phone_pattern: &str,
        nhs_number_pattern: &str,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            ae_keywords: normalise_keywords(ae_keywords),
            pii_keywords: normalise_keywords(pii_keywords),
            email: Regex::new(email_pattern)?,
            phone: Regex::new(phone_pattern)?,
            nhs_number: Regex::new(nhs_number_pattern)?,
        })
    }

    /// The classifier built from the default heuristics.
    pub fn builtin() -> &'static ContentClassifier {
        &BUILTIN
    }

    /// Classifies free text. Empty or whitespace-only text always passes.
    pub fn classify(&self, text: &str) -> ClassificationVerdict {
        if text.trim().is_empty() {
            return ClassificationVerdict::pass();
        }

        let lowered = text.to_lowercase();
        let mut reasons = Vec::new();

        if let Some(kw) = first_match(&self.ae_keywords, &lowered) {
            reasons.push(format!("Possible adverse event / PV content detected ('{kw}')."));
        }
        if let Some(kw) = first_match(&self.pii_keywords, &lowered) {
            reasons.push(format!("Possible patient-identifiable data detected ('{kw}')."));
        }

        for (pattern, reason) in [
            (&self.email, EMAIL_REASON),
            (&self.phone, PHONE_REASON),
            (&self.nhs_number, NHS_NUMBER_REASON),
        ] {
            if pattern.is_match(text) {
                reasons.push(reason.to_string());
            }
        }

        ClassificationVerdict::from_reasons(reasons)
    }

    /// Classifies text that may be absent. `None` passes.
    pub fn classify_opt(&self, text: Option<&str>) -> ClassificationVerdict {
        text.map(|t| self.classify(t)).unwrap_or_default()
    }
}

impl Default for ContentClassifier {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

fn normalise_keywords<K: AsRef<str>>(keywords: &[K]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

fn first_match<'a>(keywords: &'a [String], lowered: &str) -> Option<&'a str> {
    keywords
        .iter()
        .find(|kw| lowered.contains(kw.as_str()))
        .map(String::as_str)
}
