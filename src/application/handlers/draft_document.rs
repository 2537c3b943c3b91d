//! DraftDocumentHandler - runs one safety-gated drafting attempt.
//!
//! Pipeline, strictly in order:
//!
//! 1. resolve the tool
//! 2. classify the joined input; a block ends the attempt with no backend call
//! 3. assemble the request
//! 4. call the backend once (no retries)
//! 5. recover structured fields from the reply and interpret them; a reply
//!    with no text (refusal, incomplete response) is a parse failure and is
//!    never parsed
//!
//! Every failure is folded into a [`GenerationResult`]; `handle` never errors.

use std::sync::Arc;
use std::time::Instant;

use tracing::Instrument;

use crate::config::{AppConfig, ValidationError};
use crate::domain::foundation::RequestId;
use crate::domain::generation::{
    build_request, FailureKind, GenerationResult, ParseTier, ResponseParser,
    CLASSIFIER_NEXT_STEP, DEFAULT_TEMPERATURE, NO_REPLY_TEXT_MESSAGE,
};
use crate::domain::safety::ContentClassifier;
use crate::domain::tools::{find_tool, ToolDefinition};
use crate::ports::{AIError, AIProvider};

/// Command to draft a document with one tool.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftDocumentCommand {
    /// Tool display name or slug.
    pub tool_name: String,
    /// Form field values, in form order.
    pub fields: Vec<String>,
    /// Overrides the handler's default temperature.
    pub temperature: Option<f32>,
    /// Overrides the handler's default model.
    pub model: Option<String>,
}

impl DraftDocumentCommand {
    pub fn new(tool_name: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            fields,
            temperature: None,
            model: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Field values joined with newlines. This exact text is both classified
    /// and sent, so the gate sees what the backend would see.
    pub fn user_text(&self) -> String {
        self.fields.join("\n")
    }
}

/// Outcome of a drafting attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftDocumentResult {
    /// Correlates this attempt's log lines.
    pub request_id: RequestId,
    /// The resolved tool, absent when the name was unknown.
    pub tool: Option<ToolDefinition>,
    pub result: GenerationResult,
}

/// Handler for drafting documents.
///
/// # Dependencies
///
/// - `ContentClassifier`: safety gate, run before anything leaves the process
/// - `AIProvider`: generation backend, called at most once per attempt
///
/// # Usage
///
/// ```rust,ignore
/// let handler = DraftDocumentHandler::new(classifier, provider);
/// let cmd = DraftDocumentCommand::new("scientific-narrative-generator", fields);
/// let outcome = handler.handle(cmd).await;
/// ```
pub struct DraftDocumentHandler {
    classifier: Arc<ContentClassifier>,
    ai_provider: Arc<dyn AIProvider>,
    parser: ResponseParser,
    default_model: String,
    default_temperature: f32,
}

impl DraftDocumentHandler {
    /// Creates a handler using the provider's own model and the default
    /// temperature.
    pub fn new(classifier: Arc<ContentClassifier>, ai_provider: Arc<dyn AIProvider>) -> Self {
        let default_model = ai_provider.provider_info().model;
        Self {
            classifier,
            ai_provider,
            parser: ResponseParser::default(),
            default_model,
            default_temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Creates a handler wired from application configuration.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the safety configuration does not build.
    pub fn from_config(
        config: &AppConfig,
        ai_provider: Arc<dyn AIProvider>,
    ) -> Result<Self, ValidationError> {
        let classifier = Arc::new(config.safety.build_classifier()?);
        Ok(Self::new(classifier, ai_provider)
            .with_parser(ResponseParser::new(config.export.raw_preview_chars))
            .with_defaults(config.ai.model.clone(), config.ai.temperature))
    }

    pub fn with_parser(mut self, parser: ResponseParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_defaults(mut self, model: impl Into<String>, temperature: f32) -> Self {
        self.default_model = model.into();
        self.default_temperature = temperature;
        self
    }

    /// Runs one drafting attempt.
    pub async fn handle(&self, cmd: DraftDocumentCommand) -> DraftDocumentResult {
        let request_id = RequestId::new();
        let span = tracing::info_span!(
            "draft_document",
            request_id = %request_id,
            tool = %cmd.tool_name,
        );

        let (tool, result) = self.run(cmd).instrument(span).await;

        DraftDocumentResult {
            request_id,
            tool,
            result,
        }
    }

    async fn run(&self, cmd: DraftDocumentCommand) -> (Option<ToolDefinition>, GenerationResult) {
        let Some(tool) = find_tool(&cmd.tool_name).copied() else {
            tracing::warn!("unknown tool requested");
            return (
                None,
                GenerationResult::error(
                    FailureKind::UnknownTool,
                    format!("Unknown tool: {}", cmd.tool_name),
                ),
            );
        };

        let user_text = cmd.user_text();

        let verdict = self.classifier.classify(&user_text);
        if verdict.is_blocked() {
            tracing::info!(reasons = verdict.reasons().len(), "input blocked by classifier");
            return (
                Some(tool),
                GenerationResult::blocked(verdict.into_reasons(), CLASSIFIER_NEXT_STEP),
            );
        }
        tracing::debug!("input passed classifier");

        let model = cmd.model.as_deref().unwrap_or(&self.default_model);
        let temperature = cmd.temperature.unwrap_or(self.default_temperature);
        let request = build_request(&tool, &user_text, temperature, model);

        tracing::info!(model = %request.model_id, temperature = request.temperature, "calling generation backend");
        let started = Instant::now();
        let response = match self.ai_provider.complete(&request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    retryable = err.is_retryable(),
                    latency_ms = started.elapsed().as_millis() as u64,
                    "generation backend failed"
                );
                return (Some(tool), backend_failure(&err));
            }
        };
        tracing::info!(
            latency_ms = started.elapsed().as_millis() as u64,
            reply_chars = response.content.chars().count(),
            "generation backend replied"
        );

        if !response.has_reply_text() {
            tracing::warn!(tier = ?response.tier, "backend reply had no text to parse");
            return (
                Some(tool),
                GenerationResult::parse_failure(
                    NO_REPLY_TEXT_MESSAGE,
                    Some(self.parser.preview(&response.content)),
                ),
            );
        }

        let (fields, tier) = self.parser.parse_with_tier(&response.content);
        if tier == ParseTier::Fallback {
            tracing::warn!("no structured object recovered from reply");
        } else {
            tracing::debug!(tier = ?tier, fields = fields.len(), "reply parsed");
        }

        let result = GenerationResult::from_parsed(fields);
        if result.is_blocked() {
            tracing::info!("generation backend refused the input");
        }
        (Some(tool), result)
    }
}

fn backend_failure(err: &AIError) -> GenerationResult {
    let message = match err {
        AIError::CredentialMissing => err.to_string(),
        other => format!("OpenAI error: {}", other),
    };
    GenerationResult::error(err.failure_kind(), message)
}
