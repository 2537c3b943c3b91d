//! Content safety gate.
//!
//! A conservative, rule-based filter that decides whether free text may be
//! sent to the generation backend. It looks for adverse-event (pharmacovigilance)
//! language and patient-identifiable data. False positives are accepted;
//! this is a best-effort heuristic, not a certified PV or PII detector.

mod classifier;
mod verdict;

pub use classifier::{
    ContentClassifier, DEFAULT_AE_KEYWORDS, DEFAULT_EMAIL_PATTERN, DEFAULT_NHS_NUMBER_PATTERN,
    DEFAULT_PHONE_PATTERN, DEFAULT_PII_KEYWORDS, EMAIL_REASON, NHS_NUMBER_REASON, PHONE_REASON,
};
pub use verdict::ClassificationVerdict;
