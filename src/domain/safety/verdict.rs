//! Classification verdict value object.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Outcome of classifying one piece of text.
///
/// A verdict is blocking exactly when it carries at least one reason, so the
/// flag is derived rather than stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationVerdict {
    reasons: Vec<String>,
}

impl ClassificationVerdict {
    /// A verdict with no reasons (text may be sent).
    pub fn pass() -> Self {
        Self::default()
    }

    /// Builds a verdict from an ordered list of triggered-rule reasons.
    pub fn from_reasons(reasons: Vec<String>) -> Self {
        Self { reasons }
    }

    /// True when any rule triggered.
    pub fn is_blocked(&self) -> bool {
        !self.reasons.is_empty()
    }

    /// Human-readable reasons, in rule order.
    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    /// Consumes the verdict, returning its reasons.
    pub fn into_reasons(self) -> Vec<String> {
        self.reasons
    }
}

impl Serialize for ClassificationVerdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ClassificationVerdict", 2)?;
        state.serialize_field("is_blocked", &self.is_blocked())?;
        state.serialize_field("reasons", &self.reasons)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_is_not_blocked() {
        let verdict = ClassificationVerdict::pass();
        assert!(!verdict.is_blocked());
        assert!(verdict.reasons().is_empty());
    }

    #[test]
    fn any_reason_blocks() {
        let verdict = ClassificationVerdict::from_reasons(vec!["x".to_string()]);
        assert!(verdict.is_blocked());
        assert_eq!(verdict.into_reasons(), vec!["x"]);
    }

    #[test]
    fn serializes_derived_blocked_flag() {
        let verdict = ClassificationVerdict::from_reasons(vec!["a".to_string(), "b".to_string()]);
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"is_blocked": true, "reasons": ["a", "b"]})
        );
    }
}
