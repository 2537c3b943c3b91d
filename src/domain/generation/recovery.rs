//! Response recovery - structured fields from an untrusted free-text reply.
//!
//! The backend is told to emit a bare JSON object but is not trusted to comply.
//! Recovery is an ordered list of fallible attempts, stopping at the first
//! success:
//!
//! 1. [`ParseTier::Strict`] - the whole reply is a JSON object.
//! 2. [`ParseTier::BraceSpan`] - the text from the first `{` to the last `}`
//!    is a JSON object (recovers prose, markdown fences, trailing chatter).
//!
//! If neither succeeds the parser returns a sentinel mapping with an `error`
//! key and a bounded `raw` preview. It never fails.

use serde::Serialize;
use serde_json::{Map, Value};

/// Default bound on raw characters kept in the failure sentinel.
pub const DEFAULT_RAW_PREVIEW_CHARS: usize = 4000;

/// Key that marks a failure sentinel.
pub const ERROR_KEY: &str = "error";

/// Key holding the truncated raw reply in a failure sentinel.
pub const RAW_KEY: &str = "raw";

pub const PARSE_FAILURE_MESSAGE: &str = "Failed to parse JSON response";

/// Failure message when the backend answered without any reply text.
pub const NO_REPLY_TEXT_MESSAGE: &str = "Backend response contained no reply text";

/// Which recovery step produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseTier {
    Strict,
    BraceSpan,
    Fallback,
}

type Attempt = fn(&str) -> Option<Map<String, Value>>;

const ATTEMPTS: [(ParseTier, Attempt); 2] = [
    (ParseTier::Strict, parse_whole),
    (ParseTier::BraceSpan, parse_brace_span),
];

/// Recovers structured output, keeping at most `raw_preview_chars` characters
/// of the reply when every attempt fails.
#[derive(Debug, Clone, Copy)]
pub struct ResponseParser {
    raw_preview_chars: usize,
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new(DEFAULT_RAW_PREVIEW_CHARS)
    }
}

impl ResponseParser {
    pub fn new(raw_preview_chars: usize) -> Self {
        Self { raw_preview_chars }
    }

    /// Parses `raw` into an ordered key-value mapping.
    pub fn parse(&self, raw: &str) -> Map<String, Value> {
        self.parse_with_tier(raw).0
    }

    /// Like [`parse`](Self::parse) but also reports which tier succeeded.
    pub fn parse_with_tier(&self, raw: &str) -> (Map<String, Value>, ParseTier) {
        ATTEMPTS
            .iter()
            .find_map(|(tier, attempt)| attempt(raw).map(|fields| (fields, *tier)))
            .unwrap_or_else(|| (self.failure_sentinel(raw), ParseTier::Fallback))
    }

    /// The first `raw_preview_chars` characters of `raw`.
    pub fn preview(&self, raw: &str) -> String {
        truncate_chars(raw, self.raw_preview_chars)
    }

    fn failure_sentinel(&self, raw: &str) -> Map<String, Value> {
        let mut sentinel = Map::new();
        sentinel.insert(
            ERROR_KEY.to_string(),
            Value::String(PARSE_FAILURE_MESSAGE.to_string()),
        );
        sentinel.insert(
            RAW_KEY.to_string(),
            Value::String(self.preview(raw)),
        );
        sentinel
    }
}

/// Parses with the default raw preview bound.
pub fn parse_structured(raw: &str) -> Map<String, Value> {
    ResponseParser::default().parse(raw)
}

/// True when `fields` is a failure sentinel (or otherwise carries an `error` key).
pub fn is_parse_failure(fields: &Map<String, Value>) -> bool {
    fields.contains_key(ERROR_KEY)
}

fn parse_whole(raw: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(raw).ok()? {
        Value::Object(fields) => Some(fields),
        _ => None,
    }
}

fn parse_brace_span(raw: &str) -> Option<Map<String, Value>> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    parse_whole(&raw[start..=end])
}

fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
