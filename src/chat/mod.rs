//! Conversation orchestration - resolves one user message into one reply.
//!
//! A request makes at most two LLM calls:
//!
//! ```text
//! Init -> AwaitingFirstCompletion -> DirectAnswer
//!                                 -> ToolRequested -> AwaitingToolResult
//!                                    -> AwaitingSecondCompletion -> DirectAnswer
//! ```
//!
//! Nothing is kept between requests; each call builds its own turn set.

use std::fmt;
use std::sync::Arc;

use log::{debug, info};

use crate::error::{Result, ToolchatError};
use crate::llm::{
    CompletionRequest, ContentBlock, LlmClient, Message, ToolCall, Usage, first_tool_use, reply_or,
};
use crate::tools::ToolRegistry;

/// Reply used when the first response has no text block
pub const DIRECT_REPLY_FALLBACK: &str = "Hello! How can I help you?";

/// Reply used when the post-tool response has no text block
pub const TOOL_REPLY_FALLBACK: &str = "Here is the customer info.";

/// Validation message for an absent or empty user message
pub const MESSAGE_REQUIRED: &str = "Message is required";

/// Orchestrator states, in the order a request can visit them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    Init,
    AwaitingFirstCompletion,
    ToolRequested,
    AwaitingToolResult,
    AwaitingSecondCompletion,
    DirectAnswer,
}

impl fmt::Display for ChatState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "init",
            Self::AwaitingFirstCompletion => "awaiting_first_completion",
            Self::ToolRequested => "tool_requested",
            Self::AwaitingToolResult => "awaiting_tool_result",
            Self::AwaitingSecondCompletion => "awaiting_second_completion",
            Self::DirectAnswer => "direct_answer",
        };
        f.write_str(name)
    }
}

/// Which tool ran during a request and whether it failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolTrace {
    pub name: String,
    pub is_error: bool,
}

/// Result of a completed request
#[derive(Debug, Clone, PartialEq)]
pub struct ChatOutcome {
    pub reply: String,
    pub tool: Option<ToolTrace>,
    /// Token usage summed over both rounds
    pub usage: Usage,
    /// States visited, starting at `Init`
    pub states: Vec<ChatState>,
}

/// Tracks the state path of one request
struct Transitions {
    states: Vec<ChatState>,
}

impl Transitions {
    fn new() -> Self {
        Self {
            states: vec![ChatState::Init],
        }
    }

    fn advance(&mut self, next: ChatState) {
        if let Some(current) = self.states.last() {
            debug!("chat state {} -> {}", current, next);
        }
        self.states.push(next);
    }
}

/// Resolves user messages against an LLM and the tool registry.
///
/// Both collaborators are built once at startup and shared read-only.
pub struct ChatOrchestrator {
    llm: Arc<dyn LlmClient>,
    tools: Arc<ToolRegistry>,
}

impl ChatOrchestrator {
    pub fn new(llm: Arc<dyn LlmClient>, tools: Arc<ToolRegistry>) -> Self {
        Self { llm, tools }
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Produce the reply for one user message.
    ///
    /// Tool failures are handed back to the model; only validation and LLM
    /// service failures come back as errors. The LLM calls are never retried
    /// here.
    pub async fn respond(&self, message: &str) -> Result<ChatOutcome> {
        if message.is_empty() {
            return Err(ToolchatError::Validation(MESSAGE_REQUIRED.to_string()));
        }

        let mut path = Transitions::new();
        let mut usage = Usage::default();

        path.advance(ChatState::AwaitingFirstCompletion);
        let request = CompletionRequest::default()
            .with_user_message(message)
            .with_tools(self.tools.definitions());
        let first = self.llm.complete(request).await?;
        usage.add(&first.usage);

        let Some(call) = first_tool_use(&first) else {
            path.advance(ChatState::DirectAnswer);
            return Ok(ChatOutcome {
                reply: reply_or(&first, DIRECT_REPLY_FALLBACK),
                tool: None,
                usage,
                states: path.states,
            });
        };

        path.advance(ChatState::ToolRequested);
        info!("Model requested tool '{}' ({})", call.name, call.id);

        path.advance(ChatState::AwaitingToolResult);
        let result = self.tools.execute(&call).await;
        let trace = ToolTrace {
            name: call.name.clone(),
            is_error: result.is_error,
        };

        path.advance(ChatState::AwaitingSecondCompletion);
        let turns = tool_turn_set(message, &call, Message::tool_result(&result));
        let second = self.llm.complete(CompletionRequest::new(turns)).await?;
        usage.add(&second.usage);

        path.advance(ChatState::DirectAnswer);
        Ok(ChatOutcome {
            reply: reply_or(&second, TOOL_REPLY_FALLBACK),
            tool: Some(trace),
            usage,
            states: path.states,
        })
    }
}

/// The second-round conversation: `[user, assistant(tool_use), tool(tool_result)]`
fn tool_turn_set(message: &str, call: &ToolCall, result: Message) -> Vec<Message> {
    vec![
        Message::user(message),
        Message::assistant(vec![ContentBlock::from(call)]),
        result,
    ]
}
