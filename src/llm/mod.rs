//! LLM Client Layer - Anthropic API integration and response extraction
//!
//! This module provides:
//! - Message and content block types for LLM communication
//! - LlmClient trait for API abstraction
//! - AnthropicClient implementation
//! - ResilientClient timeout/retry decorator
//! - Response extraction rules

pub mod anthropic;
pub mod client;
pub mod extract;
pub mod resilient;
pub mod types;

pub use anthropic::{API_KEY_ENV, AnthropicClient, AnthropicConfig};
pub use client::{LlmClient, LlmError, MockLlmClient};
pub use extract::{first_text, first_tool_use, reply_or};
pub use resilient::{ResilientClient, RetryPolicy};
pub use types::{
    CompletionRequest, CompletionResponse, ContentBlock, Message, Role, StopReason, ToolCall, ToolDefinition,
    ToolResult, Usage,
};
