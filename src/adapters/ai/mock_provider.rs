//! Mock AI Provider for testing.
//!
//! Scripted stand-in for the generation backend, so the drafting pipeline
//! can be exercised without network access or a credential.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_response(r#"{"core_scientific_narrative": "..."}"#)
//!     .with_error(MockError::Unavailable { message: "down".into() });
//!
//! let first = provider.complete(&request).await?;
//! assert_eq!(provider.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::generation::GenerationRequest;
use crate::ports::{AIError, AIProvider, CompletionResponse, ProviderInfo};

/// Reply used once the scripted queue is exhausted.
pub const DEFAULT_MOCK_REPLY: &str = "{}";

/// Mock AI provider.
///
/// Clones share the response queue and the call history.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    /// Scripted responses, consumed in order.
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    info: ProviderInfo,
    /// Simulated latency per request.
    delay: Duration,
    /// Every request received, for verification.
    calls: Arc<Mutex<Vec<GenerationRequest>>>,
}

/// A scripted reply.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success { content: String },
    /// A full reply, for scripting the model or extraction tier.
    Completion(CompletionResponse),
    Error(MockError),
}

/// Failures the mock can simulate.
#[derive(Debug, Clone)]
pub enum MockError {
    CredentialMissing,
    AuthenticationFailed,
    RateLimited { retry_after_secs: u32 },
    Unavailable { message: String },
    Network { message: String },
    Timeout { timeout_secs: u64 },
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::CredentialMissing => AIError::CredentialMissing,
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::RateLimited { retry_after_secs } => AIError::rate_limited(retry_after_secs),
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::Network { message } => AIError::network(message),
            MockError::Timeout { timeout_secs } => AIError::Timeout { timeout_secs },
        }
    }
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            info: ProviderInfo::new("mock", "mock-model-1"),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a successful reply.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.push(MockResponse::Success {
            content: content.into(),
        })
    }

    /// Queues a full reply, returned as-is.
    pub fn with_completion(self, response: CompletionResponse) -> Self {
        self.push(MockResponse::Completion(response))
    }

    /// Queues a failure.
    pub fn with_error(self, error: MockError) -> Self {
        self.push(MockResponse::Error(error))
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn push(self, response: MockResponse) -> Self {
        self.responses
            .lock()
            .expect("mock response queue poisoned")
            .push_back(response);
        self
    }

    /// Number of requests received so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("mock call log poisoned").len()
    }

    /// Every request received so far, in order.
    pub fn get_calls(&self) -> Vec<GenerationRequest> {
        self.calls.lock().expect("mock call log poisoned").clone()
    }

    fn next_response(&self) -> MockResponse {
        self.responses
            .lock()
            .expect("mock response queue poisoned")
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success {
                content: DEFAULT_MOCK_REPLY.to_string(),
            })
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: &GenerationRequest) -> Result<CompletionResponse, AIError> {
        self.calls
            .lock()
            .expect("mock call log poisoned")
            .push(request.clone());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Success { content } => {
                Ok(CompletionResponse::new(content, request.model_id.clone()))
            }
            MockResponse::Completion(response) => Ok(response),
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}
