//! OpenAI Provider - AIProvider over OpenAI's Responses API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new("OPENAI_API_KEY")
//!     .with_model("gpt-4o-mini")
//!     .with_base_url("https://api.openai.com/v1");
//!
//! let provider = OpenAIProvider::new(config)?;
//! ```
//!
//! # Credential
//!
//! The API key is looked up in the named environment variable on every call
//! and wrapped in a `Secret` for the lifetime of that request only. A missing
//! or blank key fails fast with [`AIError::CredentialMissing`] before any
//! network traffic.
//!
//! # Reply extraction
//!
//! The Responses API has exposed its text in more than one shape. The reply
//! text is taken from the first of these that yields anything:
//!
//! 1. the consolidated `output_text` string
//! 2. every `output[*].content[*].text` fragment, concatenated in order
//! 3. the whole response envelope, stringified
//!
//! The tier is reported on [`CompletionResponse::tier`]. A tier-3 result means
//! the backend produced no text (a refusal or an incomplete response), so the
//! stringified envelope is kept for inspection but never parsed as a draft.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::config::AiConfig;
use crate::domain::generation::{GenerationRequest, MessageRole};
use crate::ports::{AIError, AIProvider, CompletionResponse, ExtractionTier, ProviderInfo};

/// Configuration for the OpenAI provider.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Model used when a request does not name one.
    pub model: String,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl OpenAIConfig {
    /// Creates a configuration reading the key from `api_key_env`.
    pub fn new(api_key_env: impl Into<String>) -> Self {
        Self {
            api_key_env: api_key_env.into(),
            model: crate::config::DEFAULT_MODEL.to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the default model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reads the API key from the environment. Blank counts as missing.
    fn api_key(&self) -> Result<Secret<String>, AIError> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(Secret::new(key)),
            _ => Err(AIError::CredentialMissing),
        }
    }
}

impl From<&AiConfig> for OpenAIConfig {
    fn from(config: &AiConfig) -> Self {
        Self::new(config.api_key_env.clone())
            .with_model(config.model.clone())
            .with_base_url(config.base_url.clone())
            .with_timeout(config.timeout())
    }
}

/// OpenAI API provider implementation.
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIProvider {
    /// Creates a provider with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `AIError::Network` if the HTTP client cannot be built.
    pub fn new(config: OpenAIConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn responses_url(&self) -> String {
        format!("{}/responses", self.config.base_url.trim_end_matches('/'))
    }

    fn to_openai_request<'a>(&'a self, request: &'a GenerationRequest) -> OpenAIRequest<'a> {
        let model = if request.model_id.trim().is_empty() {
            self.config.model.as_str()
        } else {
            request.model_id.as_str()
        };

        OpenAIRequest {
            model,
            temperature: request.temperature,
            input: request
                .messages()
                .into_iter()
                .map(|msg| OpenAIMessage {
                    role: match msg.role {
                        MessageRole::System => "system",
                        MessageRole::User => "user",
                    },
                    content: msg.content,
                })
                .collect(),
        }
    }

    async fn send_request(
        &self,
        request: &GenerationRequest,
        api_key: &Secret<String>,
    ) -> Result<Response, AIError> {
        let body = self.to_openai_request(request);

        self.client
            .post(self.responses_url())
            .header("Authorization", format!("Bearer {}", api_key.expose_secret()))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))
    }

    fn map_transport_error(&self, e: reqwest::Error) -> AIError {
        if e.is_timeout() {
            AIError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if e.is_connect() {
            AIError::network(format!("Connection failed: {}", e))
        } else {
            AIError::network(e.to_string())
        }
    }

    /// Maps non-success statuses onto `AIError`.
    async fn handle_response_status(&self, response: Response) -> Result<Response, AIError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        let detail = error_message(&error_body);

        match status.as_u16() {
            401 | 403 => Err(AIError::AuthenticationFailed),
            429 => Err(AIError::rate_limited(parse_retry_after(&detail))),
            400 | 404 | 422 => Err(AIError::invalid_request(detail)),
            500..=599 => Err(AIError::unavailable(format!(
                "Server error {}: {}",
                status, detail
            ))),
            _ => Err(AIError::network(format!(
                "Unexpected status {}: {}",
                status, detail
            ))),
        }
    }

    async fn parse_response(
        &self,
        response: Response,
        fallback_model: &str,
    ) -> Result<CompletionResponse, AIError> {
        let response = self.handle_response_status(response).await?;

        let envelope: Value = response
            .json()
            .await
            .map_err(|e| self.map_body_error(e))?;

        let model = envelope
            .get("model")
            .and_then(Value::as_str)
            .unwrap_or(fallback_model)
            .to_string();

        let (content, tier) = extract_text(&envelope);
        if tier == ExtractionTier::Envelope {
            tracing::warn!(
                status = envelope.get("status").and_then(serde_json::Value::as_str).unwrap_or("unknown"),
                "response carried no reply text"
            );
        }

        Ok(CompletionResponse::new(content, model).with_tier(tier))
    }

    fn map_body_error(&self, e: reqwest::Error) -> AIError {
        if e.is_timeout() {
            AIError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else {
            AIError::parse(format!("Failed to parse response: {}", e))
        }
    }
}

#[async_trait]
impl AIProvider for OpenAIProvider {
    async fn complete(&self, request: &GenerationRequest) -> Result<CompletionResponse, AIError> {
        let api_key = self.config.api_key()?;

        let response = self.send_request(request, &api_key).await?;
        self.parse_response(response, &request.model_id).await
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("openai", self.config.model.clone())
    }
}

/// Pulls the reply text out of a Responses API envelope, reporting which
/// tier found it.
pub fn extract_text(envelope: &Value) -> (String, ExtractionTier) {
    if let Some(text) = envelope.get("output_text").and_then(Value::as_str) {
        if !text.is_empty() {
            return (text.to_string(), ExtractionTier::Consolidated);
        }
    }

    let fragments: String = envelope
        .get("output")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|item| item.get("content").and_then(Value::as_array))
        .flatten()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();
    if !fragments.is_empty() {
        return (fragments, ExtractionTier::Fragments);
    }

    (envelope.to_string(), ExtractionTier::Envelope)
}

/// Prefers the API's `error.message` over the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

/// Finds "try again in Ns" in a rate-limit message. Defaults to 30 seconds.
fn parse_retry_after(message: &str) -> u32 {
    message
        .find("try again in ")
        .map(|idx| &message[idx + "try again in ".len()..])
        .and_then(|rest| {
            let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse::<u32>().ok()
        })
        .unwrap_or(30)
}

// ════════════════════════════════════════════════════════════════════════════
// OpenAI API Types
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    temperature: f32,
    input: Vec<OpenAIMessage>,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: &'static str,
    content: String,
}
