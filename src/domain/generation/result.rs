//! Generation result - the outcome of one drafting attempt.

use serde::Serialize;
use serde_json::{Map, Value};

use super::recovery::{is_parse_failure, ERROR_KEY, PARSE_FAILURE_MESSAGE, RAW_KEY};

/// Next step shown when the content classifier blocks the input.
pub const CLASSIFIER_NEXT_STEP: &str = "Remove AE or patient-identifiable data and try again.";

/// Reason used when the backend refuses without saying why.
pub const BACKEND_BLOCK_REASON: &str = "Blocked by the drafting backend.";

const BLOCKED_KEY: &str = "blocked";
const REASON_KEY: &str = "reason";
const NEXT_STEP_KEY: &str = "next_step";

/// Failure categories that end a generation attempt.
///
/// All are terminal for the attempt; none is retried automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// No backend credential configured. Needs operator action.
    CredentialMissing,
    /// Transport or backend error, surfaced verbatim.
    BackendFailure,
    /// The backend replied but no structured object could be recovered.
    ParseFailure,
    /// The requested tool is not in the registry.
    UnknownTool,
}

/// Outcome of a drafting attempt. Exactly one variant is ever populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationResult {
    /// Input rejected by the safety gate, or refused by the backend itself.
    Blocked {
        reasons: Vec<String>,
        next_step: String,
    },
    /// The attempt failed.
    Error {
        kind: FailureKind,
        message: String,
        /// Bounded raw reply, kept for manual inspection of parse failures
        #[serde(skip_serializing_if = "Option::is_none")]
        raw: Option<String>,
    },
    /// Structured fields in the schema's reading order.
    Success { fields: Map<String, Value> },
}

impl GenerationResult {
    pub fn blocked(reasons: Vec<String>, next_step: impl Into<String>) -> Self {
        Self::Blocked {
            reasons,
            next_step: next_step.into(),
        }
    }

    pub fn error(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::Error {
            kind,
            message: message.into(),
            raw: None,
        }
    }

    pub fn parse_failure(message: impl Into<String>, raw: Option<String>) -> Self {
        Self::Error {
            kind: FailureKind::ParseFailure,
            message: message.into(),
            raw,
        }
    }

    pub fn success(fields: Map<String, Value>) -> Self {
        Self::Success { fields }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }

    /// Interprets the mapping recovered from a backend reply.
    ///
    /// An `error` key means recovery failed. `"blocked": true` is the
    /// backend refusing on its own; its `reason` and `next_step` are carried
    /// over. Anything else is a success.
    pub fn from_parsed(fields: Map<String, Value>) -> Self {
        if is_parse_failure(&fields) {
            let message = fields
                .get(ERROR_KEY)
                .and_then(Value::as_str)
                .unwrap_or(PARSE_FAILURE_MESSAGE)
                .to_string();
            let raw = fields
                .get(RAW_KEY)
                .and_then(Value::as_str)
                .map(str::to_string);
            return Self::parse_failure(message, raw);
        }

        if fields.get(BLOCKED_KEY) == Some(&Value::Bool(true)) {
            let reason = non_empty_str(&fields, REASON_KEY).unwrap_or(BACKEND_BLOCK_REASON);
            let next_step = non_empty_str(&fields, NEXT_STEP_KEY).unwrap_or(CLASSIFIER_NEXT_STEP);
            return Self::blocked(vec![reason.to_string()], next_step);
        }

        Self::success(fields)
    }

    /// The structured fields, when the attempt succeeded.
    pub fn fields(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Success { fields } => Some(fields),
            _ => None,
        }
    }
}

fn non_empty_str<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}
