//! Core LLM client trait, error type and a scripted client for tests

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::types::{CompletionRequest, CompletionResponse};

/// Stateless LLM client - each call is independent
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Single completion request (blocking until complete)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;

    /// Model identifier this client sends by default
    fn model(&self) -> &str;
}

/// Errors that can occur during LLM operations
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing API key: environment variable {env_var} not set")]
    MissingApiKey { env_var: String },
}

impl LlmError {
    /// Transient failures worth another attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::RateLimited { .. } => true,
            LlmError::Api { status, .. } => *status >= 500,
            LlmError::Network(_) => true,
            LlmError::Timeout(_) => true,
            LlmError::Auth(_) => false,
            LlmError::InvalidResponse(_) => false,
            LlmError::Json(_) => false,
            LlmError::MissingApiKey { .. } => false,
        }
    }
}

/// Scripted client: replays queued results in order and records every request.
///
/// Used by the orchestrator and endpoint tests in place of a live service.
#[derive(Debug, Default)]
pub struct MockLlmClient {
    script: Mutex<VecDeque<Result<CompletionResponse, LlmError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockLlmClient {
    /// Create a client that answers with `responses` in order
    pub fn new(responses: Vec<CompletionResponse>) -> Self {
        Self::with_results(responses.into_iter().map(Ok).collect())
    }

    /// Create a client whose script may include failures
    pub fn with_results(results: Vec<Result<CompletionResponse, LlmError>>) -> Self {
        Self {
            script: Mutex::new(results.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a failure
    pub fn push_error(&self, error: LlmError) {
        self.lock_script().push_back(Err(error));
    }

    /// Every request received so far, oldest first
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of completion calls made
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn lock_script(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<CompletionResponse, LlmError>>> {
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).push(request);
        self.lock_script()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::InvalidResponse("mock script exhausted".to_string())))
    }

    fn model(&self) -> &str {
        "mock-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_error_is_retryable() {
        assert!(
            LlmError::RateLimited {
                retry_after: Duration::from_secs(60)
            }
            .is_retryable()
        );

        assert!(
            LlmError::Api {
                status: 529,
                message: "Overloaded".to_string()
            }
            .is_retryable()
        );

        assert!(
            !LlmError::Api {
                status: 400,
                message: "Bad request".to_string()
            }
            .is_retryable()
        );

        assert!(LlmError::Timeout(Duration::from_secs(1)).is_retryable());
        assert!(!LlmError::Auth("invalid x-api-key".to_string()).is_retryable());
        assert!(!LlmError::InvalidResponse("bad".to_string()).is_retryable());
    }

    #[tokio::test]
    async fn test_mock_replays_in_order_and_records() {
        let mock = MockLlmClient::new(vec![CompletionResponse::text("one"), CompletionResponse::text("two")]);

        let first = mock.complete(CompletionRequest::default().with_user_message("a")).await.unwrap();
        let second = mock.complete(CompletionRequest::default().with_user_message("b")).await.unwrap();

        assert_eq!(first, CompletionResponse::text("one"));
        assert_eq!(second, CompletionResponse::text("two"));
        assert_eq!(mock.call_count(), 2);
        assert_eq!(mock.requests()[1].messages[0].content[0], crate::llm::ContentBlock::text("b"));
    }

    #[tokio::test]
    async fn test_mock_exhausted_script_is_an_error() {
        let mock = MockLlmClient::default();
        let result = mock.complete(CompletionRequest::default()).await;
        assert!(matches!(result, Err(LlmError::InvalidResponse(_))));
        assert_eq!(mock.model(), "mock-model");
    }

    #[tokio::test]
    async fn test_mock_scripted_error() {
        let mock = MockLlmClient::default();
        mock.push_error(LlmError::Auth("invalid x-api-key".to_string()));
        let err = mock.complete(CompletionRequest::default()).await.unwrap_err();
        assert!(matches!(err, LlmError::Auth(_)));
    }
}
