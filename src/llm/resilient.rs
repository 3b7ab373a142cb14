//! Timeout and bounded retry around an LlmClient.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::warn;

use crate::config::LlmConfig;

use super::client::{LlmClient, LlmError};
use super::types::{CompletionRequest, CompletionResponse};

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    /// A single attempt: failures surface immediately
    fn default() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_secs(5),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }

    pub fn should_retry(&self, attempt: u32, error: &LlmError) -> bool {
        error.is_retryable() && attempt < self.max_attempts
    }

    /// Delay before the attempt after `attempt`; a rate-limit hint wins when longer
    pub fn backoff_for_attempt(&self, attempt: u32, error: &LlmError) -> Duration {
        let exponent = attempt.saturating_sub(1) as i32;
        let unbounded = self.initial_backoff.as_secs_f64() * self.backoff_multiplier.powi(exponent);
        let backoff = Duration::from_secs_f64(unbounded.min(self.max_backoff.as_secs_f64()));

        match error {
            LlmError::RateLimited { retry_after } => backoff.max(*retry_after).min(self.max_backoff),
            _ => backoff,
        }
    }
}

impl From<&LlmConfig> for RetryPolicy {
    fn from(config: &LlmConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            initial_backoff: Duration::from_millis(config.initial_backoff_ms),
            max_backoff: Duration::from_millis(config.max_backoff_ms),
            ..Self::default()
        }
    }
}

/// Wraps a client with a per-attempt timeout and a retry policy
pub struct ResilientClient {
    inner: Arc<dyn LlmClient>,
    timeout: Duration,
    policy: RetryPolicy,
}

impl ResilientClient {
    pub fn new(inner: Arc<dyn LlmClient>, timeout: Duration, policy: RetryPolicy) -> Self {
        Self { inner, timeout, policy }
    }

    pub fn from_config(inner: Arc<dyn LlmClient>, config: &LlmConfig) -> Self {
        Self::new(inner, Duration::from_millis(config.timeout_ms), RetryPolicy::from(config))
    }

    async fn attempt(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        match tokio::time::timeout(self.timeout, self.inner.complete(request)).await {
            Ok(result) => result,
            Err(_) => Err(LlmError::Timeout(self.timeout)),
        }
    }
}

#[async_trait]
impl LlmClient for ResilientClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let mut attempt = 1;

        loop {
            match self.attempt(request.clone()).await {
                Ok(response) => return Ok(response),
                Err(error) if self.policy.should_retry(attempt, &error) => {
                    let delay = self.policy.backoff_for_attempt(attempt, &error);
                    warn!(
                        "LLM call failed (attempt {}/{}): {}; retrying in {:?}",
                        attempt, self.policy.max_attempts, error, delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }

    fn model(&self) -> &str {
        self.inner.model()
    }
}
