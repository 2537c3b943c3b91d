//! AI Provider Port - interface to the structured-generation backend.
//!
//! The drafting pipeline hands over a fully assembled [`GenerationRequest`]
//! and gets back the backend's raw text. Recovering structure from that text
//! is the domain's job (see `domain::generation::ResponseParser`), so
//! providers never inspect or reshape the reply content.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct EchoProvider;
//!
//! #[async_trait]
//! impl AIProvider for EchoProvider {
//!     async fn complete(&self, request: &GenerationRequest) -> Result<CompletionResponse, AIError> {
//!         Ok(CompletionResponse::new("{}", &request.model_id))
//!     }
//!
//!     fn provider_info(&self) -> ProviderInfo {
//!         ProviderInfo::new("echo", "none")
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::generation::{FailureKind, GenerationRequest};

/// Port for the generation backend.
#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Sends one request and returns the raw reply text.
    ///
    /// Called at most once per drafting attempt. Implementations must not
    /// retry on their own.
    async fn complete(&self, request: &GenerationRequest) -> Result<CompletionResponse, AIError>;

    /// Provider name and default model, for logs and the CLI.
    fn provider_info(&self) -> ProviderInfo;
}

/// Where in the backend's envelope the reply text was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionTier {
    /// A single consolidated text field.
    #[default]
    Consolidated,
    /// Content fragments concatenated in order.
    Fragments,
    /// No text was found; `content` is the whole envelope, stringified.
    ///
    /// This is diagnostic output, not a reply, and must not be parsed as one.
    Envelope,
}

/// Raw reply from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    /// Reply text, untrusted and unparsed.
    pub content: String,
    /// Model that produced the reply.
    pub model: String,
    pub tier: ExtractionTier,
}

impl CompletionResponse {
    pub fn new(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: model.into(),
            tier: ExtractionTier::default(),
        }
    }

    pub fn with_tier(mut self, tier: ExtractionTier) -> Self {
        self.tier = tier;
        self
    }

    /// True when the backend produced reply text at all.
    pub fn has_reply_text(&self) -> bool {
        self.tier != ExtractionTier::Envelope
    }
}

/// Provider information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "openai", "mock").
    pub name: String,
    /// Model used when a request does not name one.
    pub model: String,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// AI provider errors.
///
/// Display strings are user-facing and must never contain the credential.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AIError {
    /// No credential is configured for the backend.
    #[error("credential unavailable")]
    CredentialMissing,

    /// The backend rejected the credential.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Rate limited by the backend.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Backend is unavailable (5xx or similar).
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// The backend's envelope (not the reply text) could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// The backend rejected the request as malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl AIError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Returns true if this error is transient.
    ///
    /// Informational only: the drafting pipeline never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AIError::RateLimited { .. }
                | AIError::Unavailable { .. }
                | AIError::Network(_)
                | AIError::Timeout { .. }
        )
    }

    /// The result-level failure category this error maps to.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            AIError::CredentialMissing => FailureKind::CredentialMissing,
            _ => FailureKind::BackendFailure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_missing_message_names_no_secret() {
        assert_eq!(AIError::CredentialMissing.to_string(), "credential unavailable");
    }

    #[test]
    fn ai_error_retryable_classification() {
        assert!(AIError::rate_limited(30).is_retryable());
        assert!(AIError::unavailable("down").is_retryable());
        assert!(AIError::network("reset").is_retryable());
        assert!(AIError::Timeout { timeout_secs: 30 }.is_retryable());

        assert!(!AIError::CredentialMissing.is_retryable());
        assert!(!AIError::AuthenticationFailed.is_retryable());
        assert!(!AIError::parse("bad envelope").is_retryable());
        assert!(!AIError::invalid_request("bad").is_retryable());
    }

    #[test]
    fn only_missing_credential_maps_to_credential_failure() {
        assert_eq!(
            AIError::CredentialMissing.failure_kind(),
            FailureKind::CredentialMissing
        );
        assert_eq!(
            AIError::AuthenticationFailed.failure_kind(),
            FailureKind::BackendFailure
        );
        assert_eq!(
            AIError::Timeout { timeout_secs: 5 }.failure_kind(),
            FailureKind::BackendFailure
        );
    }

    #[test]
    fn envelope_fallback_has_no_reply_text() {
        let reply = CompletionResponse::new("{}", "m");
        assert_eq!(reply.tier, ExtractionTier::Consolidated);
        assert!(reply.has_reply_text());
        assert!(reply
            .clone()
            .with_tier(ExtractionTier::Fragments)
            .has_reply_text());
        assert!(!reply.with_tier(ExtractionTier::Envelope).has_reply_text());
    }

    #[test]
    fn provider_info_holds_name_and_model() {
        let info = ProviderInfo::new("openai", "gpt-4o-mini");
        assert_eq!(info.name, "openai");
        assert_eq!(info.model, "gpt-4o-mini");
    }
}
